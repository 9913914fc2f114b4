//! The generic decision tree the rule modules instantiate.
//!
//! A tree is either a terminal or a decision with two mandatory children,
//! so a half-wired tree cannot be written down. Trees are built once at
//! startup (`LazyLock` statics in the rule modules) and only ever read.

use regelguard_types::{RuleHit, Verdict};
use std::fmt;

/// Identifier type of one rule tree: a small `Copy` enum whose variants
/// each map to a stable tag.
pub trait RuleId: Copy + Eq + fmt::Debug {
    /// Stable tag surfaced in execution paths, logs and hit names.
    fn tag(self) -> &'static str;
}

/// What a terminal contributes to the evaluation outcome.
pub trait Terminal {
    fn verdict(&self) -> Verdict;
    fn rule_hit(&self) -> Option<&RuleHit>;
}

/// The standard terminal: a verdict, and a hit when the verdict is a
/// failing one.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    pub verdict: Verdict,
    pub hit: Option<RuleHit>,
}

impl Leaf {
    pub fn ok() -> Self {
        Leaf {
            verdict: Verdict::Ok,
            hit: None,
        }
    }

    pub fn manual(hit: RuleHit) -> Self {
        Leaf {
            verdict: Verdict::ManualProcessing,
            hit: Some(hit),
        }
    }

    pub fn invalid(hit: RuleHit) -> Self {
        Leaf {
            verdict: Verdict::Invalid,
            hit: Some(hit),
        }
    }
}

impl Terminal for Leaf {
    fn verdict(&self) -> Verdict {
        self.verdict
    }

    fn rule_hit(&self) -> Option<&RuleHit> {
        self.hit.as_ref()
    }
}

#[derive(Clone, Debug)]
pub enum RuleNode<K, R> {
    Result(R),
    Decision(DecisionNode<K, R>),
}

#[derive(Clone, Debug)]
pub struct DecisionNode<K, R> {
    pub id: K,
    pub yes: Box<RuleNode<K, R>>,
    pub no: Box<RuleNode<K, R>>,
}

impl<K, R> RuleNode<K, R> {
    /// Both branches are required up front.
    pub fn decision(id: K, yes: RuleNode<K, R>, no: RuleNode<K, R>) -> Self {
        RuleNode::Decision(DecisionNode {
            id,
            yes: Box::new(yes),
            no: Box::new(no),
        })
    }

    /// Longest root-to-leaf chain of decisions. Bounds the number of
    /// predicate invocations for any single evaluation.
    pub fn depth(&self) -> usize {
        match self {
            RuleNode::Result(_) => 0,
            RuleNode::Decision(node) => 1 + node.yes.depth().max(node.no.depth()),
        }
    }
}
