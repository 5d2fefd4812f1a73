use std::path::PathBuf;
use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    /// Path to the game installation. Falls back to $COM3D2_INSTALL_DIR
    #[clap(long)]
    pub root: Option<PathBuf>,

    /// Directory scanned recursively for unpacked DLC installer folders
    #[clap(long, default_value = ".")]
    pub source: PathBuf,

    /// Verify the CRC-32 of every source file against its content manifest
    #[clap(long)]
    pub verify_crc: bool,

    /// Install without asking for confirmation
    #[clap(short = 'y', long)]
    pub yes: bool,

    /// Show what would be installed without copying anything
    #[clap(long)]
    pub dry_run: bool,
}
