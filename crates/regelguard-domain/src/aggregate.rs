//! Running every configured tree and folding one overall verdict.

use crate::evaluate::TraceSink;
use crate::model::{RuleMetadata, Sykmelding};
use crate::policy::EffectiveConfig;
use regelguard_types::{JuridiskHenvisning, RuleHit, ValidationResult, Verdict};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Type-erased record of one decision, shared by aggregation, audit and
/// serialization. `tag` replaces the per-tree identifier enum.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathRecord {
    pub tag: &'static str,
    pub outcome: bool,
    pub inputs: BTreeMap<String, JsonValue>,
}

/// Erased outcome of one tree evaluation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TreeEvaluation {
    pub path: Vec<PathRecord>,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_hit: Option<RuleHit>,
}

/// Uniform runner signature every rule module exposes.
pub type TreeRunner = fn(&Sykmelding, &RuleMetadata, &mut dyn TraceSink) -> TreeEvaluation;

/// A rule tree as registered for execution: stable key, optional statutory
/// citation, and the type-erased runner.
#[derive(Clone)]
pub struct ConfiguredTree {
    pub key: &'static str,
    pub citation: Option<JuridiskHenvisning>,
    pub run: TreeRunner,
}

/// One evaluated tree, as handed to the audit binder.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TreeRun {
    pub key: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<JuridiskHenvisning>,
    pub evaluation: TreeEvaluation,
}

/// Sum of one validation run across all enabled trees.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationOutcome {
    pub status: Verdict,
    /// Hits from every tree whose verdict equals `status`, in declared
    /// tree order. The first element is the deterministic tie-break
    /// winner. Empty when `status` is `Ok`.
    pub rule_hits: Vec<RuleHit>,
    pub runs: Vec<TreeRun>,
    pub skipped: Vec<&'static str>,
}

impl ValidationOutcome {
    pub fn result(&self) -> ValidationResult {
        ValidationResult {
            status: self.status,
            rule_hits: self.rule_hits.clone(),
        }
    }
}

/// Evaluate every enabled tree in declared order and fold the overall
/// status as the severity maximum.
///
/// Trees are independent: each sees the same immutable certificate and
/// metadata, and no tree observes another's outcome. Evaluation is
/// sequential in declared order, which is what makes the tie-break
/// (`rule_hits[0]`) deterministic.
pub fn run_all(
    trees: &[ConfiguredTree],
    cfg: &EffectiveConfig,
    sykmelding: &Sykmelding,
    meta: &RuleMetadata,
    trace: &mut dyn TraceSink,
) -> ValidationOutcome {
    let mut runs = Vec::with_capacity(trees.len());
    let mut skipped = Vec::new();
    for tree in trees {
        if !cfg.tree_enabled(tree.key) {
            skipped.push(tree.key);
            continue;
        }
        let evaluation = (tree.run)(sykmelding, meta, trace);
        runs.push(TreeRun {
            key: tree.key,
            citation: tree.citation.clone(),
            evaluation,
        });
    }

    let status = runs
        .iter()
        .map(|run| run.evaluation.verdict)
        .max()
        .unwrap_or(Verdict::Ok);
    // Ok terminals carry no hit, so an Ok status yields an empty list here.
    let rule_hits = runs
        .iter()
        .filter(|run| run.evaluation.verdict == status)
        .filter_map(|run| run.evaluation.rule_hit.clone())
        .collect();

    ValidationOutcome {
        status,
        rule_hits,
        runs,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::NoopTrace;
    use crate::policy::{AuditPolicy, TreePolicy};
    use crate::test_support;

    fn hit(name: &str) -> RuleHit {
        RuleHit {
            rule_name: name.to_string(),
            message_for_sender: format!("{name} til avsender"),
            message_for_user: format!("{name} til pasient"),
            fingerprint: None,
        }
    }

    fn fixed(verdict: Verdict, name: &'static str) -> TreeEvaluation {
        TreeEvaluation {
            path: Vec::new(),
            verdict,
            rule_hit: match verdict {
                Verdict::Ok => None,
                _ => Some(hit(name)),
            },
        }
    }

    fn run_ok(_: &Sykmelding, _: &RuleMetadata, _: &mut dyn TraceSink) -> TreeEvaluation {
        fixed(Verdict::Ok, "OK_TRE")
    }
    fn run_manual(_: &Sykmelding, _: &RuleMetadata, _: &mut dyn TraceSink) -> TreeEvaluation {
        fixed(Verdict::ManualProcessing, "MANUELL_TRE")
    }
    fn run_invalid_a(_: &Sykmelding, _: &RuleMetadata, _: &mut dyn TraceSink) -> TreeEvaluation {
        fixed(Verdict::Invalid, "UGYLDIG_A")
    }
    fn run_invalid_b(_: &Sykmelding, _: &RuleMetadata, _: &mut dyn TraceSink) -> TreeEvaluation {
        fixed(Verdict::Invalid, "UGYLDIG_B")
    }

    fn tree(key: &'static str, run: TreeRunner) -> ConfiguredTree {
        ConfiguredTree {
            key,
            citation: None,
            run,
        }
    }

    fn config_for(keys: &[&str]) -> EffectiveConfig {
        EffectiveConfig {
            profile: "test".to_string(),
            audit: AuditPolicy {
                enabled: false,
                kilde: "regelguard".to_string(),
            },
            trees: keys
                .iter()
                .map(|k| (k.to_string(), TreePolicy::enabled()))
                .collect(),
        }
    }

    #[test]
    fn all_ok_yields_ok_and_no_hits() {
        let trees = [tree("a", run_ok), tree("b", run_ok)];
        let cfg = config_for(&["a", "b"]);
        let outcome = run_all(
            &trees,
            &cfg,
            &test_support::sykmelding_enkel(),
            &RuleMetadata::default(),
            &mut NoopTrace,
        );
        assert_eq!(outcome.status, Verdict::Ok);
        assert!(outcome.rule_hits.is_empty());
        assert_eq!(outcome.runs.len(), 2);
    }

    #[test]
    fn manual_outranks_ok() {
        let trees = [tree("a", run_ok), tree("b", run_manual)];
        let cfg = config_for(&["a", "b"]);
        let outcome = run_all(
            &trees,
            &cfg,
            &test_support::sykmelding_enkel(),
            &RuleMetadata::default(),
            &mut NoopTrace,
        );
        assert_eq!(outcome.status, Verdict::ManualProcessing);
        assert_eq!(outcome.rule_hits.len(), 1);
        assert_eq!(outcome.rule_hits[0].rule_name, "MANUELL_TRE");
    }

    #[test]
    fn invalid_outranks_manual_and_only_invalid_hits_surface() {
        let trees = [
            tree("a", run_ok),
            tree("b", run_invalid_a),
            tree("c", run_manual),
        ];
        let cfg = config_for(&["a", "b", "c"]);
        let outcome = run_all(
            &trees,
            &cfg,
            &test_support::sykmelding_enkel(),
            &RuleMetadata::default(),
            &mut NoopTrace,
        );
        assert_eq!(outcome.status, Verdict::Invalid);
        // the manual tree's hit is below the overall status and stays out
        assert_eq!(outcome.rule_hits.len(), 1);
        assert_eq!(outcome.rule_hits[0].rule_name, "UGYLDIG_A");
    }

    #[test]
    fn severity_ties_break_by_declared_order() {
        let trees = [tree("b", run_invalid_b), tree("a", run_invalid_a)];
        let cfg = config_for(&["a", "b"]);
        let outcome = run_all(
            &trees,
            &cfg,
            &test_support::sykmelding_enkel(),
            &RuleMetadata::default(),
            &mut NoopTrace,
        );
        assert_eq!(outcome.status, Verdict::Invalid);
        assert_eq!(outcome.rule_hits.len(), 2);
        // declared order, not alphabetical
        assert_eq!(outcome.rule_hits[0].rule_name, "UGYLDIG_B");
        assert_eq!(outcome.rule_hits[1].rule_name, "UGYLDIG_A");
    }

    #[test]
    fn disabled_trees_are_skipped_not_run() {
        let trees = [tree("a", run_invalid_a), tree("b", run_ok)];
        let mut cfg = config_for(&["b"]);
        cfg.trees
            .insert("a".to_string(), TreePolicy::disabled());
        let outcome = run_all(
            &trees,
            &cfg,
            &test_support::sykmelding_enkel(),
            &RuleMetadata::default(),
            &mut NoopTrace,
        );
        assert_eq!(outcome.status, Verdict::Ok);
        assert_eq!(outcome.skipped, vec!["a"]);
        assert_eq!(outcome.runs.len(), 1);
        assert_eq!(outcome.runs[0].key, "b");
    }

    #[test]
    fn no_enabled_trees_defaults_to_ok() {
        let trees = [tree("a", run_invalid_a)];
        let cfg = config_for(&[]);
        let outcome = run_all(
            &trees,
            &cfg,
            &test_support::sykmelding_enkel(),
            &RuleMetadata::default(),
            &mut NoopTrace,
        );
        assert_eq!(outcome.status, Verdict::Ok);
        assert!(outcome.runs.is_empty());
    }
}
