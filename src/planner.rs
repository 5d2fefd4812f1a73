use std::collections::BTreeMap;
use crate::manifest::version_newer;
use crate::validator::InstallCandidate;

/// The installable set: one winning candidate per target path, keyed by
/// target so iteration (and plan output) is deterministic.
pub type InstallPlan = BTreeMap<String, InstallCandidate>;

/// Reduces validated candidates from every discovered installer into one
/// winner per target file.
///
/// Several installers may ship the same target at different versions; the
/// highest version wins. Ties keep the candidate seen first, which follows
/// folder-enumeration order and is therefore not otherwise guaranteed.
pub fn build_plan(candidates: Vec<InstallCandidate>) -> InstallPlan {
    let mut plan = InstallPlan::new();
    for candidate in candidates {
        match plan.get(&candidate.target) {
            Some(current) if !version_newer(&candidate.to_version, &current.to_version) => {}
            _ => {
                plan.insert(candidate.target.clone(), candidate);
            }
        }
    }
    plan
}
