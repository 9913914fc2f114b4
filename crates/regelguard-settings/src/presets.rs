use regelguard_domain::policy::{AuditPolicy, EffectiveConfig, TreePolicy};
use regelguard_types::explain;
use std::collections::BTreeMap;

/// Preset profiles are opinionated defaults.
///
/// `standard` runs every tree and emits audit records. `dryrun` runs every
/// tree but emits none: re-validating historical certificates must not
/// create new legal events. Unknown profiles are the caller's error.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "standard" => Some(standard_profile()),
        "dryrun" => Some(dryrun_profile()),
        _ => None,
    }
}

fn standard_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "standard".to_string(),
        audit: AuditPolicy {
            enabled: true,
            kilde: "regelguard".to_string(),
        },
        trees: all_trees_enabled(),
    }
}

fn dryrun_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "dryrun".to_string(),
        audit: AuditPolicy {
            enabled: false,
            kilde: "regelguard".to_string(),
        },
        trees: all_trees_enabled(),
    }
}

fn all_trees_enabled() -> BTreeMap<String, TreePolicy> {
    explain::all_tree_keys()
        .iter()
        .map(|key| (key.to_string(), TreePolicy::enabled()))
        .collect()
}
