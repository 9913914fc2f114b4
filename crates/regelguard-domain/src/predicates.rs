//! Predicate sets: the pure functions behind decision nodes.

use crate::model::{RuleMetadata, Sykmelding};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// What one predicate evaluation produced: which branch to take, and the
/// named inputs it actually consumed. Inputs feed the execution path and,
/// for citation-bearing trees, the audit record; a predicate that looked
/// at nothing records nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct PredicateOutcome {
    pub outcome: bool,
    pub inputs: BTreeMap<String, JsonValue>,
}

impl PredicateOutcome {
    pub fn new(outcome: bool) -> Self {
        PredicateOutcome {
            outcome,
            inputs: BTreeMap::new(),
        }
    }

    pub fn with_input(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.inputs.insert(key.to_string(), value.into());
        self
    }
}

/// One predicate set per rule tree. The implementation is an exhaustive
/// `match` over the tree's identifier enum; an identifier without a
/// predicate is a compile error, not a startup panic.
///
/// Predicates must be total and deterministic: same certificate and
/// metadata, same outcome and inputs, every time. A predicate that cannot
/// be assessed (missing metadata, no periods) returns its documented
/// non-triggering fallback instead of erroring.
pub trait PredicateSet<K> {
    fn evaluate(&self, id: K, sykmelding: &Sykmelding, meta: &RuleMetadata) -> PredicateOutcome;
}
