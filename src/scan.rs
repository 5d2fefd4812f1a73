use std::fs;
use std::path::Path;
use anyhow::Result;
use walkdir::WalkDir;
use crate::classifier::{classify, Classification, UnsupportedReason};
use crate::manifest::{parse_content_manifest, InstalledManifest, UPDATE_LST};
use crate::util::warn;
use crate::validator::{validate, InstallCandidate, Rejection, ValidateOptions, Validation};

/// Walks `source_root` recursively and collects every validated install
/// candidate from the installer folders found there.
///
/// A directory only counts as an installer folder if it contains a content
/// manifest; everything else is passed over without a message. Unsupported
/// installers are reported once per folder, size/CRC/missing-source
/// rejections once per entry. Version rejections stay silent.
///
/// Nothing past the pre-flight checks is fatal: an unreadable directory or
/// a broken content manifest warns and skips that folder, the scan
/// continues with the rest.
pub fn collect_candidates(
    source_root: &Path,
    install_root: &Path,
    installed: &InstalledManifest,
    options: &ValidateOptions,
) -> Result<Vec<InstallCandidate>> {
    let mut candidates = Vec::new();
    for entry in WalkDir::new(source_root).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn(&format!("Could not read directory entry: {}; skipping", err));
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let folder = entry.path();
        if !folder.join(UPDATE_LST).is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        match classify(&name) {
            Classification::Ignored => {}
            Classification::Unsupported(UnsupportedReason::NewPackageFormat) => {
                warn(&format!(
                    "'{}' uses the new package format and has to be installed manually",
                    name
                ));
            }
            Classification::Unsupported(UnsupportedReason::UnknownLayout) => {
                warn(&format!(
                    "'{}' looks like an installer, but its layout is not recognized; skipping",
                    name
                ));
            }
            Classification::Supported => {
                scan_folder(folder, &name, install_root, installed, options, &mut candidates)?;
            }
        }
    }
    Ok(candidates)
}

fn scan_folder(
    folder: &Path,
    name: &str,
    install_root: &Path,
    installed: &InstalledManifest,
    options: &ValidateOptions,
    candidates: &mut Vec<InstallCandidate>,
) -> Result<()> {
    let manifest_path = folder.join(UPDATE_LST);
    let content = match fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(err) => {
            warn(&format!(
                "{}: could not read '{}': {}; skipping folder",
                name,
                manifest_path.display(),
                err
            ));
            return Ok(());
        }
    };
    let entries = match parse_content_manifest(&content) {
        Ok(entries) => entries,
        Err(err) => {
            warn(&format!(
                "{}: invalid content manifest: {}; skipping folder",
                name, err
            ));
            return Ok(());
        }
    };
    println!("Scanning '{}' ({} entries)", name, entries.len());

    for entry in &entries {
        match validate(entry, folder, install_root, installed, options)? {
            Validation::Accepted(candidate) => candidates.push(candidate),
            Validation::Rejected(Rejection::NotNewer) => {}
            Validation::Rejected(Rejection::MissingSource) => {
                warn(&format!(
                    "{}: source file '{}' is missing; skipping '{}'",
                    name,
                    entry.effective_source(),
                    entry.target
                ));
            }
            Validation::Rejected(Rejection::SizeMismatch { expected, actual }) => {
                warn(&format!(
                    "{}: '{}' is {} bytes, manifest declares {}; skipping",
                    name,
                    entry.effective_source(),
                    actual,
                    expected
                ));
            }
            Validation::Rejected(Rejection::CrcMismatch { expected, actual }) => {
                warn(&format!(
                    "{}: '{}' has CRC-32 {}, manifest declares {}; skipping",
                    name,
                    entry.effective_source(),
                    actual,
                    expected
                ));
            }
        }
    }
    Ok(())
}
