//! Pure rule evaluation (no IO).
//!
//! Input: a decoded certificate plus rule metadata assembled elsewhere.
//! Output: per-tree execution paths + verdicts + rule hits.

#![forbid(unsafe_code)]

pub mod model;
pub mod policy;
pub mod predicates;
pub mod tree;

mod aggregate;
mod evaluate;
mod fingerprint;

pub mod test_support;
pub mod trees;

pub use aggregate::{
    run_all, ConfiguredTree, PathRecord, TreeEvaluation, TreeRun, TreeRunner, ValidationOutcome,
};
pub use evaluate::{evaluate, Evaluation, LogTrace, NoopTrace, PathEntry, TraceSink};
pub use fingerprint::rule_hit_fingerprint;

/// Entry points for the fuzz targets in `fuzz/`.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a certificate and run every standard tree
    /// over it with empty rule metadata.
    ///
    /// Returns `Ok(...)` for valid certificate JSON, `Err(...)` otherwise.
    /// **Never panics** on any input.
    pub fn parse_and_evaluate(text: &str) -> Result<(), serde_json::Error> {
        let sykmelding: model::Sykmelding = serde_json::from_str(text)?;
        let standard = trees::standard_trees();
        let config = policy::EffectiveConfig {
            profile: "fuzz".to_string(),
            audit: policy::AuditPolicy {
                enabled: false,
                kilde: "fuzz".to_string(),
            },
            trees: standard
                .iter()
                .map(|t| (t.key.to_string(), policy::TreePolicy::enabled()))
                .collect(),
        };
        let _ = run_all(
            &standard,
            &config,
            &sykmelding,
            &model::RuleMetadata::default(),
            &mut NoopTrace,
        );
        Ok(())
    }
}

#[cfg(test)]
mod proptest;
