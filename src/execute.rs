use anyhow::Result;
use dlcup::installer::apply_plan;
use dlcup::manifest::{InstalledManifest, UPDATE_LST};
use dlcup::planner::{build_plan, InstallPlan};
use dlcup::scan::collect_candidates;
use dlcup::util::{confirm, resolve_install_root};
use dlcup::validator::ValidateOptions;
use crate::cli::CLI;

pub fn execute(cli: CLI) -> Result<()> {
    let install_root = resolve_install_root(cli.root)?;
    let manifest_path = install_root.join(UPDATE_LST);
    let mut installed = InstalledManifest::load(&manifest_path)?;
    println!("Installation: {}", install_root.display());
    println!("{} file(s) currently tracked", installed.len());

    let options = ValidateOptions {
        verify_crc: cli.verify_crc,
    };
    let candidates = collect_candidates(&cli.source, &install_root, &installed, &options)?;
    let plan = build_plan(candidates);
    if plan.is_empty() {
        println!("Everything is up to date.");
        return Ok(());
    }

    println!();
    print_plan(&plan);
    if cli.dry_run {
        println!("Dry run, nothing installed.");
        return Ok(());
    }
    if !cli.yes && !confirm(&format!("Install {} file(s)? [y/N] ", plan.len()))? {
        println!("Aborted. No changes made.");
        return Ok(());
    }

    let applied = apply_plan(&plan, &mut installed);
    // The manifest rewrite happens even when a copy failed partway, so the
    // entries that did get installed are not forgotten. It must contain the
    // complete mapping, old entries included.
    installed.save(&manifest_path)?;
    applied?;
    println!("Done. {} file(s) installed.", plan.len());
    Ok(())
}

fn print_plan(plan: &InstallPlan) {
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
    }
}
