//! Effective runtime policy, resolved from presets and configuration in
//! `regelguard-settings` before the engine runs.

use std::collections::BTreeMap;

/// Per-tree execution policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreePolicy {
    pub enabled: bool,
}

impl TreePolicy {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

/// Whether evaluations emit subsumsjon records, and under which source tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditPolicy {
    pub enabled: bool,
    pub kilde: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    pub audit: AuditPolicy,
    pub trees: BTreeMap<String, TreePolicy>,
}

impl EffectiveConfig {
    /// Trees missing from the map are not run. Resolution in
    /// `regelguard-settings` always materializes every known tree, so a
    /// miss here means the key was disabled, not forgotten.
    pub fn tree_enabled(&self, key: &str) -> bool {
        self.trees.get(key).map(|p| p.enabled).unwrap_or(false)
    }
}
