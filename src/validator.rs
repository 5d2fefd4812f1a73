use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crate::manifest::{version_newer, InstalledManifest, ManifestEntry};
use crate::util::native_path;

/// A file update that has passed every enabled validation check for one
/// installer folder.
#[derive(Debug, Clone)]
pub struct InstallCandidate {
    /// Target path exactly as spelled in the content manifest; key of the
    /// installed-state manifest.
    pub target: String,
    /// Name of the installer folder, for plan output.
    pub folder: String,
    pub from_version: String,
    pub to_version: String,
    /// Resolved source file inside the installer folder.
    pub source_path: PathBuf,
    /// Resolved destination file inside the installation.
    pub dest_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Check the CRC-32 of every source file against the manifest.
    /// Off by default; the size check alone catches truncated downloads.
    pub verify_crc: bool,
}

/// Why an entry produced no candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The installed version is already at least as new. The expected common
    /// case when re-running against an updated installation; not reported.
    NotNewer,
    /// The declared source file does not exist or can't be stat'ed.
    MissingSource,
    SizeMismatch { expected: u64, actual: u64 },
    CrcMismatch { expected: String, actual: String },
}

#[derive(Debug, Clone)]
pub enum Validation {
    Accepted(InstallCandidate),
    Rejected(Rejection),
}

/// Validates one content-manifest entry against the current installed state
/// and the files actually present in `folder`.
///
/// Checks run in order: version, size, CRC-32 (only when enabled). The
/// first failing check rejects the entry.
pub fn validate(
    entry: &ManifestEntry,
    folder: &Path,
    install_root: &Path,
    installed: &InstalledManifest,
    options: &ValidateOptions,
) -> Result<Validation> {
    let from_version = installed.version_of(&entry.target).to_string();
    if !version_newer(&entry.version, &from_version) {
        return Ok(Validation::Rejected(Rejection::NotNewer));
    }

    let source_path = folder.join(native_path(&entry.effective_source()));
    let metadata = match fs::metadata(&source_path) {
        Ok(metadata) => metadata,
        Err(_) => return Ok(Validation::Rejected(Rejection::MissingSource)),
    };
    if metadata.len() != entry.size {
        return Ok(Validation::Rejected(Rejection::SizeMismatch {
            expected: entry.size,
            actual: metadata.len(),
        }));
    }

    if options.verify_crc {
        let bytes = fs::read(&source_path)
            .with_context(|| format!("Could not read '{}'", source_path.display()))?;
        let actual = crc32_hex(&bytes);
        if !actual.eq_ignore_ascii_case(&entry.crc32) {
            return Ok(Validation::Rejected(Rejection::CrcMismatch {
                expected: entry.crc32.clone(),
                actual,
            }));
        }
    }

    let folder_name = folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Validation::Accepted(InstallCandidate {
        target: entry.target.clone(),
        folder: folder_name,
        from_version,
        to_version: entry.version.clone(),
        source_path,
        dest_path: install_root.join(native_path(&entry.target)),
    }))
}

/// Standard CRC-32 (the reflected 0xEDB88320 polynomial) as 8 uppercase hex
/// digits, matching how content manifests spell their checksums.
pub fn crc32_hex(bytes: &[u8]) -> String {
    format!("{:08X}", crc32fast::hash(bytes))
}
