use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use anyhow::{bail, Context, Result};

/// File name used by both manifest kinds: the installed-state manifest at the
/// installation root and the content manifest inside each installer folder.
pub const UPDATE_LST: &str = "update.lst";

/// The installed-state manifest: which version of every managed file is
/// currently present in the installation.
///
/// Records are `path,version` lines. Version tokens are opaque strings, see
/// [`version_newer`] for how they are ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledManifest {
    pub versions: BTreeMap<String, String>,
}

impl InstalledManifest {
    /// Loads the manifest from `path`.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or contains a malformed record.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<InstalledManifest> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read manifest '{}'", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid manifest '{}'", path.display()))
    }

    /// Parses `path,version` records. Blank lines are skipped; a record with
    /// any other field count is an error. Values must not contain commas,
    /// the format has no escaping.
    pub fn parse(content: &str) -> Result<InstalledManifest> {
        let mut versions = BTreeMap::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 2 {
                bail!("Line {}: expected 'path,version', got '{}'", number + 1, line);
            }
            versions.insert(fields[0].to_string(), fields[1].to_string());
        }
        Ok(InstalledManifest { versions })
    }

    /// Renders the complete mapping, one `path,version` record per line,
    /// every line newline-terminated.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (path, version) in &self.versions {
            let _ = writeln!(out, "{},{}", path, version);
        }
        out
    }

    /// Writes the full mapping to `path`, replacing the previous content.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.serialize())
            .with_context(|| format!("Could not write manifest '{}'", path.display()))
    }

    /// Installed version for a target file, `"0"` if the file is not tracked yet.
    pub fn version_of(&self, target: &str) -> &str {
        self.versions.get(target).map(String::as_str).unwrap_or("0")
    }

    pub fn set(&mut self, target: &str, version: &str) {
        self.versions.insert(target.to_string(), version.to_string());
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// One record of an installer's content manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub record_type: String,
    /// Source path relative to the installer folder, or the literal `0`
    /// meaning "derive from the target path".
    pub from_path: String,
    /// Target path relative to the installation root. Unique key of the entry.
    pub target: String,
    pub size: u64,
    /// Declared CRC-32 of the source file, 8 hex digits.
    pub crc32: String,
    pub version: String,
}

impl ManifestEntry {
    /// Source path with the `0` shorthand expanded to `data\<target>`.
    pub fn effective_source(&self) -> String {
        if self.from_path == "0" {
            format!("data\\{}", self.target)
        } else {
            self.from_path.clone()
        }
    }
}

/// Parses an installer's content manifest: six comma-separated fields per
/// record, `type,fromPathOrZero,toPath,sizeBytes,crc32Hex,version`.
pub fn parse_content_manifest(content: &str) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 6 {
            bail!("Line {}: expected 6 fields, got {}", number + 1, fields.len());
        }
        let size = fields[3]
            .parse::<u64>()
            .with_context(|| format!("Line {}: invalid size '{}'", number + 1, fields[3]))?;
        entries.push(ManifestEntry {
            record_type: fields[0].to_string(),
            from_path: fields[1].to_string(),
            target: fields[2].to_string(),
            size,
            crc32: fields[4].to_string(),
            version: fields[5].to_string(),
        });
    }
    Ok(entries)
}

/// Whether `candidate` is strictly newer than `installed`.
///
/// Version tokens are compared as raw strings, not numerically. Existing
/// `update.lst` files were written under this ordering, so it stays
/// byte-wise for compatibility ("9" counts as newer than "10").
pub fn version_newer(candidate: &str, installed: &str) -> bool {
    candidate > installed
}
