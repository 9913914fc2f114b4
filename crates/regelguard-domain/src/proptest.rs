//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Single-path tree evaluation and path bounds
//! - Verdict aggregation across trees
//! - Determinism of repeated runs
//! - Configuration gating

use crate::evaluate::NoopTrace;
use crate::model::{Periode, PeriodeRef, RuleMetadata, Sykmelding};
use crate::test_support;
use crate::trees;
use crate::{run_all, ConfiguredTree};
use proptest::prelude::*;
use regelguard_types::{explain, Verdict};
use time::{Date, Duration};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for dates between 2020 and 2028. Ordinal 365 exists in every
/// year, so no filtering is needed.
fn arb_dato() -> impl Strategy<Value = Date> {
    (2020i32..=2028, 1u16..=365).prop_map(|(year, ordinal)| {
        Date::from_ordinal_date(year, ordinal).expect("ordinal in range")
    })
}

/// Strategy for an absence period of up to two months, optionally graded.
fn arb_periode() -> impl Strategy<Value = Periode> {
    (arb_dato(), 0i64..=60, prop::option::of(0u8..=100)).prop_map(|(fom, lengde, grad)| Periode {
        fom,
        tom: fom.saturating_add(Duration::days(lengde)),
        grad,
    })
}

fn arb_perioder() -> impl Strategy<Value = Vec<Periode>> {
    prop::collection::vec(arb_periode(), 0..4)
}

fn arb_begrunnelse() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Pasienten kunne ikke oppsøke lege.".to_string())),
        Just(Some("   ".to_string())),
    ]
}

/// Strategy for a full certificate. The consultation date is the earliest
/// fom shifted by up to ~3.5 years either way, so the backdating tree sees
/// every branch.
fn arb_sykmelding() -> impl Strategy<Value = Sykmelding> {
    (arb_perioder(), arb_dato(), -30i64..=1300, arb_begrunnelse()).prop_map(
        |(perioder, fallback, offset, begrunnelse)| {
            let base = perioder.iter().map(|p| p.fom).min().unwrap_or(fallback);
            let mut s = test_support::sykmelding_behandlet(
                perioder,
                base.saturating_add(Duration::days(offset)),
            );
            s.begrunnelse_ikke_kontakt = begrunnelse;
            s
        },
    )
}

fn arb_metadata() -> impl Strategy<Value = RuleMetadata> {
    (
        prop::option::of(arb_dato()),
        any::<bool>(),
        any::<bool>(),
        prop::collection::vec((arb_dato(), 0i64..=30), 0..3),
    )
        .prop_map(|(fodselsdato, ettersending, suspendert, tidligere)| RuleMetadata {
            pasient_fodselsdato: fodselsdato,
            legekontor_orgnr: None,
            er_ettersending: ettersending,
            behandler_suspendert: suspendert,
            tidligere_sykmeldinger: tidligere
                .into_iter()
                .map(|(fom, lengde)| PeriodeRef {
                    fom,
                    tom: fom.saturating_add(Duration::days(lengde)),
                })
                .collect(),
        })
}

fn standard_keys() -> Vec<&'static str> {
    trees::standard_trees()
        .iter()
        .map(|t: &ConfiguredTree| t.key)
        .collect()
}

// ============================================================================
// Single-tree evaluation invariants
// ============================================================================

proptest! {
    /// Every tree walks exactly one root-to-leaf path, and no tree is
    /// deeper than five decisions.
    #[test]
    fn every_tree_walks_a_bounded_path(s in arb_sykmelding(), meta in arb_metadata()) {
        for tree in trees::standard_trees() {
            let evaluation = (tree.run)(&s, &meta, &mut NoopTrace);
            prop_assert!(!evaluation.path.is_empty(), "{} walked no decisions", tree.key);
            prop_assert!(
                evaluation.path.len() <= 5,
                "{} walked {} decisions",
                tree.key,
                evaluation.path.len()
            );
        }
    }

    /// Non-Ok verdicts always carry a hit with both messages and a
    /// fingerprint; Ok verdicts never carry one.
    #[test]
    fn hits_accompany_every_non_ok_verdict(s in arb_sykmelding(), meta in arb_metadata()) {
        for tree in trees::standard_trees() {
            let evaluation = (tree.run)(&s, &meta, &mut NoopTrace);
            match &evaluation.rule_hit {
                None => prop_assert_eq!(evaluation.verdict, Verdict::Ok),
                Some(hit) => {
                    prop_assert_ne!(evaluation.verdict, Verdict::Ok);
                    prop_assert!(!hit.rule_name.is_empty());
                    prop_assert!(!hit.message_for_sender.is_empty());
                    prop_assert!(!hit.message_for_user.is_empty());
                    let fp = hit.fingerprint.as_deref().unwrap_or("");
                    prop_assert_eq!(fp.len(), 64);
                    prop_assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
                }
            }
        }
    }

    /// Every decision on a path uses a tag the explain registry knows,
    /// and a hit's rule name is always the tag of the last decision.
    #[test]
    fn paths_use_registered_tags(s in arb_sykmelding(), meta in arb_metadata()) {
        for tree in trees::standard_trees() {
            let evaluation = (tree.run)(&s, &meta, &mut NoopTrace);
            for entry in &evaluation.path {
                prop_assert!(
                    explain::all_tags().contains(&entry.tag),
                    "unknown tag {}",
                    entry.tag
                );
            }
            if let Some(hit) = &evaluation.rule_hit {
                let last = evaluation.path.last().map(|e| e.tag).unwrap_or("");
                prop_assert_eq!(hit.rule_name.as_str(), last);
            }
        }
    }
}

// ============================================================================
// Aggregation invariants
// ============================================================================

proptest! {
    /// The overall status is the severity maximum over the runs, and the
    /// surfaced hits come exactly from the trees at that severity.
    #[test]
    fn status_is_the_severity_maximum(s in arb_sykmelding(), meta in arb_metadata()) {
        let trees = trees::standard_trees();
        let outcome = run_all(
            &trees,
            &test_support::config_all_enabled(),
            &s,
            &meta,
            &mut NoopTrace,
        );
        let max = outcome
            .runs
            .iter()
            .map(|run| run.evaluation.verdict)
            .max()
            .unwrap_or(Verdict::Ok);
        prop_assert_eq!(outcome.status, max);
        let at_max = outcome
            .runs
            .iter()
            .filter(|run| run.evaluation.verdict == max && run.evaluation.rule_hit.is_some())
            .count();
        prop_assert_eq!(outcome.rule_hits.len(), at_max);
        prop_assert_eq!(outcome.status == Verdict::Ok, outcome.rule_hits.is_empty());
    }

    /// Runs come back in declared tree order regardless of input.
    #[test]
    fn runs_follow_declared_order(s in arb_sykmelding(), meta in arb_metadata()) {
        let trees = trees::standard_trees();
        let outcome = run_all(
            &trees,
            &test_support::config_all_enabled(),
            &s,
            &meta,
            &mut NoopTrace,
        );
        let keys: Vec<&str> = outcome.runs.iter().map(|run| run.key).collect();
        prop_assert_eq!(keys, standard_keys());
        prop_assert!(outcome.skipped.is_empty());
    }
}

// ============================================================================
// Determinism
// ============================================================================

proptest! {
    /// Re-running the same input yields byte-identical serialized runs.
    #[test]
    fn repeated_runs_are_byte_identical(s in arb_sykmelding(), meta in arb_metadata()) {
        let trees = trees::standard_trees();
        let cfg = test_support::config_all_enabled();
        let first = run_all(&trees, &cfg, &s, &meta, &mut NoopTrace);
        let second = run_all(&trees, &cfg, &s, &meta, &mut NoopTrace);
        prop_assert_eq!(&first, &second);
        let a = serde_json::to_vec(&first.runs).expect("serializable");
        let b = serde_json::to_vec(&second.runs).expect("serializable");
        prop_assert_eq!(a, b);
    }
}

// ============================================================================
// Configuration gating
// ============================================================================

proptest! {
    /// Disabling one tree moves it to `skipped` and leaves the others
    /// untouched; every declared tree is accounted for exactly once.
    #[test]
    fn disabled_trees_are_skipped(
        s in arb_sykmelding(),
        meta in arb_metadata(),
        which in 0usize..5,
    ) {
        let trees = trees::standard_trees();
        let key = standard_keys()[which];
        let outcome = run_all(
            &trees,
            &test_support::config_without(key),
            &s,
            &meta,
            &mut NoopTrace,
        );
        prop_assert_eq!(outcome.skipped.clone(), vec![key]);
        prop_assert_eq!(outcome.runs.len() + outcome.skipped.len(), trees.len());
        prop_assert!(outcome.runs.iter().all(|run| run.key != key));
    }
}
