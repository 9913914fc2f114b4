//! Grading: every graded period must certify at least 20 % reduced
//! working capacity.

use crate::aggregate::{ConfiguredTree, TreeEvaluation};
use crate::evaluate::{evaluate, TraceSink};
use crate::model::{RuleMetadata, Sykmelding};
use crate::predicates::{PredicateOutcome, PredicateSet};
use crate::tree::{Leaf, RuleId, RuleNode};
use regelguard_types::{tags, JuridiskHenvisning, Lovverk, RuleHit};
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gradering {
    GradUnder20,
}

impl RuleId for Gradering {
    fn tag(self) -> &'static str {
        match self {
            Gradering::GradUnder20 => tags::REGEL_GRADE_BELOW_20,
        }
    }
}

struct Predikater;

impl PredicateSet<Gradering> for Predikater {
    fn evaluate(
        &self,
        id: Gradering,
        sykmelding: &Sykmelding,
        meta: &RuleMetadata,
    ) -> PredicateOutcome {
        match id {
            Gradering::GradUnder20 => grad_under_20(sykmelding, meta),
        }
    }
}

/// Strictly below 20 triggers; exactly 20 passes. Ungraded periods are
/// full absence and never trigger, and a certificate without periods has
/// nothing to assess.
fn grad_under_20(sykmelding: &Sykmelding, _meta: &RuleMetadata) -> PredicateOutcome {
    let laveste = sykmelding.perioder.iter().filter_map(|p| p.grad).min();
    let Some(laveste) = laveste else {
        return PredicateOutcome::new(false);
    };
    PredicateOutcome::new(laveste < 20).with_input("laveste_grad", laveste)
}

static TRE: LazyLock<RuleNode<Gradering, Leaf>> = LazyLock::new(|| {
    RuleNode::decision(
        Gradering::GradUnder20,
        RuleNode::Result(Leaf::invalid(RuleHit {
            rule_name: tags::REGEL_GRADE_BELOW_20.to_string(),
            message_for_sender:
                "Sykmeldingsgraden er under 20 %. Sykmeldingen gir ikke rett til sykepenger."
                    .to_string(),
            message_for_user:
                "Sykmeldingen kan ikke benyttes fordi sykmeldingsgraden er lavere enn 20 %."
                    .to_string(),
            fingerprint: None,
        })),
        RuleNode::Result(Leaf::ok()),
    )
});

pub fn run(
    sykmelding: &Sykmelding,
    meta: &RuleMetadata,
    trace: &mut dyn TraceSink,
) -> TreeEvaluation {
    super::erase(
        sykmelding,
        evaluate(
            tags::TREE_GRADERING,
            &TRE,
            &Predikater,
            sykmelding,
            meta,
            trace,
        ),
    )
}

pub fn configured() -> ConfiguredTree {
    ConfiguredTree {
        key: tags::TREE_GRADERING,
        citation: Some(JuridiskHenvisning::ny(Lovverk::Folketrygdloven, "8-13").med_ledd(1)),
        run,
    }
}
