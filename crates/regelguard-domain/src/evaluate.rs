//! Deterministic single-path tree traversal.

use crate::model::{RuleMetadata, Sykmelding};
use crate::predicates::{PredicateOutcome, PredicateSet};
use crate::tree::{RuleId, RuleNode, Terminal};
use regelguard_types::Verdict;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// One decision taken on the realized path, in visitation order.
#[derive(Clone, Debug, PartialEq)]
pub struct PathEntry<K> {
    pub id: K,
    pub outcome: bool,
    pub inputs: BTreeMap<String, JsonValue>,
}

/// Everything a single tree evaluation produced. The terminal is borrowed
/// from the tree, which outlives every evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation<'t, K, R> {
    pub path: Vec<PathEntry<K>>,
    pub terminal: &'t R,
}

/// Observer for evaluation steps.
///
/// Replaces ad-hoc path printing: production wires [`LogTrace`], tests
/// mostly pass [`NoopTrace`] or a recording sink of their own.
pub trait TraceSink {
    fn decision(&mut self, tree: &'static str, tag: &'static str, outcome: bool);
    fn terminal(&mut self, tree: &'static str, verdict: Verdict);
}

pub struct NoopTrace;

impl TraceSink for NoopTrace {
    fn decision(&mut self, _tree: &'static str, _tag: &'static str, _outcome: bool) {}
    fn terminal(&mut self, _tree: &'static str, _verdict: Verdict) {}
}

/// Emits every step through `tracing` at debug level.
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn decision(&mut self, tree: &'static str, tag: &'static str, outcome: bool) {
        tracing::debug!(tree, rule = tag, outcome, "rule evaluated");
    }

    fn terminal(&mut self, tree: &'static str, verdict: Verdict) {
        tracing::debug!(tree, ?verdict, "tree settled");
    }
}

/// Walk the single realized path from root to a terminal.
///
/// At each decision the predicate for that node runs exactly once; the
/// untaken branch is never touched. Trees are finite and acyclic, so this
/// terminates after at most `root.depth()` predicate invocations, and the
/// returned path has one entry per decision visited.
pub fn evaluate<'t, K, R>(
    tree: &'static str,
    root: &'t RuleNode<K, R>,
    predicates: &impl PredicateSet<K>,
    sykmelding: &Sykmelding,
    meta: &RuleMetadata,
    trace: &mut dyn TraceSink,
) -> Evaluation<'t, K, R>
where
    K: RuleId,
    R: Terminal,
{
    let mut path = Vec::new();
    let mut node = root;
    loop {
        match node {
            RuleNode::Result(terminal) => {
                trace.terminal(tree, terminal.verdict());
                return Evaluation { path, terminal };
            }
            RuleNode::Decision(decision) => {
                let PredicateOutcome { outcome, inputs } =
                    predicates.evaluate(decision.id, sykmelding, meta);
                trace.decision(tree, decision.id.tag(), outcome);
                path.push(PathEntry {
                    id: decision.id,
                    outcome,
                    inputs,
                });
                node = if outcome { &*decision.yes } else { &*decision.no };
            }
        }
    }
}
