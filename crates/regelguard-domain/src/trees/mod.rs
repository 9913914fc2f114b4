//! The standard rule trees.
//!
//! One module per tree. Each declares its identifier enum, its predicate
//! set, a `LazyLock` tree built once per process, and a `configured()`
//! entry for the registry below.

use crate::aggregate::{ConfiguredTree, PathRecord, TreeEvaluation};
use crate::evaluate::Evaluation;
use crate::fingerprint::rule_hit_fingerprint;
use crate::model::Sykmelding;
use crate::tree::{RuleId, Terminal};

pub mod behandler;
pub mod gradering;
pub mod pasientalder;
pub mod periode;
pub mod tilbakedatering;

pub(crate) mod utils;

/// Every standard tree in declared order. The order is part of the
/// contract: aggregation surfaces severity-tied hits in it.
pub fn standard_trees() -> Vec<ConfiguredTree> {
    vec![
        periode::configured(),
        pasientalder::configured(),
        gradering::configured(),
        tilbakedatering::configured(),
        behandler::configured(),
    ]
}

/// Erase the per-tree identifier type and stamp the hit fingerprint,
/// which depends on the certificate and so cannot live in the static
/// leaves.
pub(crate) fn erase<K, R>(sykmelding: &Sykmelding, evaluation: Evaluation<'_, K, R>) -> TreeEvaluation
where
    K: RuleId,
    R: Terminal,
{
    let path = evaluation
        .path
        .into_iter()
        .map(|entry| PathRecord {
            tag: entry.id.tag(),
            outcome: entry.outcome,
            inputs: entry.inputs,
        })
        .collect();

    let forste_fom = utils::forste_periode(&sykmelding.perioder).map(|p| utils::iso_dato(p.fom));
    let rule_hit = evaluation.terminal.rule_hit().map(|hit| {
        let mut hit = hit.clone();
        hit.fingerprint = Some(rule_hit_fingerprint(
            &hit.rule_name,
            &sykmelding.pasient_ident,
            forste_fom.as_deref(),
        ));
        hit
    });

    TreeEvaluation {
        path,
        verdict: evaluation.terminal.verdict(),
        rule_hit,
    }
}
