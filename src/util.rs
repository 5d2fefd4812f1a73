use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use anyhow::{bail, Result};
use colored::Colorize;
use crate::manifest::UPDATE_LST;

/// Environment variable consulted when `--root` is not given.
pub const INSTALL_DIR_ENV: &str = "COM3D2_INSTALL_DIR";

/// Resolves the game installation directory from the `--root` flag or the
/// `COM3D2_INSTALL_DIR` environment variable and checks that it carries an
/// installed-state manifest.
///
/// # Errors
/// Returns an error if no directory is configured, the directory does not
/// exist, or it has no `update.lst`. Nothing has been touched at that point.
pub fn resolve_install_root(override_root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match override_root {
        Some(root) => root,
        None => match std::env::var(INSTALL_DIR_ENV) {
            Ok(value) if !value.is_empty() => PathBuf::from(value),
            _ => bail!(
                "No installation directory given. Pass --root or set {}.",
                INSTALL_DIR_ENV
            ),
        },
    };
    if !root.is_dir() {
        bail!("Installation directory not found: '{}'", root.display());
    }
    if !root.join(UPDATE_LST).is_file() {
        bail!(
            "No {} in '{}'. Is this really the game installation?",
            UPDATE_LST,
            root.display()
        );
    }
    Ok(root)
}

/// Prints a warning to stderr, visually distinct from normal plan output.
pub fn warn(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Prompts the operator and reads one line from stdin.
/// Anything but an explicit yes (see [`is_affirmative`]) declines.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(is_affirmative(&line))
}

/// Case-insensitive `y` / `yes`, surrounding whitespace ignored.
pub fn is_affirmative(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("y") || input.eq_ignore_ascii_case("yes")
}

/// Converts a manifest-internal path to a native relative path.
/// Manifests written on Windows use `\`, hand-edited ones often `/`;
/// both are accepted as separators.
pub fn native_path(manifest_path: &str) -> PathBuf {
    manifest_path
        .split(['/', '\\'])
        .filter(|component| !component.is_empty())
        .collect()
}
