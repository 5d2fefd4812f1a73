use std::fs;
use anyhow::{Context, Result};
use crate::manifest::InstalledManifest;
use crate::planner::InstallPlan;

/// Executes the install plan: copies every planned file into the
/// installation and records its new version in the in-memory manifest.
///
/// The first failed copy aborts the remaining plan. Entries applied before
/// the failure stay recorded in `installed`, so the caller can persist the
/// partial progress before surfacing the error. The manifest is never
/// updated for a file that was not actually copied.
pub fn apply_plan(plan: &InstallPlan, installed: &mut InstalledManifest) -> Result<()> {
    let total = plan.len();
    for (index, candidate) in plan.values().enumerate() {
        println!(
            "[{}/{}] {}: {} {} -> {}",
            index + 1,
            total,
            candidate.folder,
            candidate.target,
            candidate.from_version,
            candidate.to_version
        );
        if let Some(parent) = candidate.dest_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create '{}'", parent.display()))?;
        }
        fs::copy(&candidate.source_path, &candidate.dest_path).with_context(|| {
            format!(
                "Failed to install '{}' from '{}'",
                candidate.target,
                candidate.source_path.display()
            )
        })?;
        installed.set(&candidate.target, &candidate.to_version);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::InstallCandidate;
    use tempfile::TempDir;

    fn plan_with(candidates: Vec<InstallCandidate>) -> InstallPlan {
        let mut plan = InstallPlan::new();
        for candidate in candidates {
            plan.insert(candidate.target.clone(), candidate);
        }
        plan
    }

    fn candidate(
        folder: &std::path::Path,
        root: &std::path::Path,
        target: &str,
        version: &str,
        bytes: Option<&[u8]>,
    ) -> InstallCandidate {
        let source_path = folder.join("data").join(target);
        if let Some(bytes) = bytes {
            fs::create_dir_all(source_path.parent().unwrap()).unwrap();
            fs::write(&source_path, bytes).unwrap();
        }
        InstallCandidate {
            target: target.to_string(),
            folder: folder.file_name().unwrap().to_string_lossy().into_owned(),
            from_version: "0".to_string(),
            to_version: version.to_string(),
            source_path,
            dest_path: root.join(target),
        }
    }

    #[test]
    fn test_apply_copies_and_records_version() {
        let folder = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let plan = plan_with(vec![candidate(
            folder.path(),
            root.path(),
            "a.png",
            "100",
            Some(b"pixels"),
        )]);
        let mut installed = InstalledManifest::default();
        apply_plan(&plan, &mut installed).unwrap();
        assert_eq!(fs::read(root.path().join("a.png")).unwrap(), b"pixels");
        assert_eq!(installed.version_of("a.png"), "100");
    }

    #[test]
    fn test_apply_creates_nested_directories() {
        let folder = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let plan = plan_with(vec![candidate(
            folder.path(),
            root.path(),
            "chara/outfits/a.png",
            "3",
            Some(b"x"),
        )]);
        let mut installed = InstalledManifest::default();
        apply_plan(&plan, &mut installed).unwrap();
        assert!(root.path().join("chara/outfits/a.png").is_file());
    }

    #[test]
    fn test_apply_overwrites_existing_file() {
        let folder = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("a.png"), b"old").unwrap();
        let plan = plan_with(vec![candidate(
            folder.path(),
            root.path(),
            "a.png",
            "2",
            Some(b"new"),
        )]);
        let mut installed = InstalledManifest::default();
        installed.set("a.png", "1");
        apply_plan(&plan, &mut installed).unwrap();
        assert_eq!(fs::read(root.path().join("a.png")).unwrap(), b"new");
        assert_eq!(installed.version_of("a.png"), "2");
    }

    #[test]
    fn test_pre_existing_manifest_entries_survive() {
        let folder = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let plan = plan_with(vec![candidate(
            folder.path(),
            root.path(),
            "a.png",
            "100",
            Some(b"x"),
        )]);
        let mut installed = InstalledManifest::default();
        installed.set("untouched.png", "7");
        apply_plan(&plan, &mut installed).unwrap();
        assert_eq!(installed.version_of("untouched.png"), "7");
        assert_eq!(installed.version_of("a.png"), "100");
    }

    #[test]
    fn test_failed_copy_aborts_but_keeps_progress() {
        let folder = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        // BTreeMap order: "a.png" applies first, "b.png" has no source file.
        let plan = plan_with(vec![
            candidate(folder.path(), root.path(), "a.png", "1", Some(b"x")),
            candidate(folder.path(), root.path(), "b.png", "1", None),
        ]);
        let mut installed = InstalledManifest::default();
        let result = apply_plan(&plan, &mut installed);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("b.png"));
        assert_eq!(installed.version_of("a.png"), "1");
        assert_eq!(installed.version_of("b.png"), "0");
    }
}
