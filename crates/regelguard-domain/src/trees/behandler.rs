//! Practitioner authorisation, ftrl. § 8-7 1. ledd. A single decision: a
//! certificate signed by a practitioner whose authorisation was suspended
//! on the consultation date cannot be used.

use crate::aggregate::{ConfiguredTree, TreeEvaluation};
use crate::evaluate::{evaluate, TraceSink};
use crate::model::{RuleMetadata, Sykmelding};
use crate::predicates::{PredicateOutcome, PredicateSet};
use crate::tree::{Leaf, RuleId, RuleNode};
use crate::trees::utils::iso_dato;
use regelguard_types::{tags, JuridiskHenvisning, Lovverk, RuleHit};
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behandler {
    BehandlerSuspendert,
}

impl RuleId for Behandler {
    fn tag(self) -> &'static str {
        match self {
            Behandler::BehandlerSuspendert => tags::REGEL_BEHANDLER_SUSPENDERT,
        }
    }
}

struct Predikater;

impl PredicateSet<Behandler> for Predikater {
    fn evaluate(
        &self,
        id: Behandler,
        sykmelding: &Sykmelding,
        meta: &RuleMetadata,
    ) -> PredicateOutcome {
        match id {
            Behandler::BehandlerSuspendert => PredicateOutcome::new(meta.behandler_suspendert)
                .with_input("behandler_suspendert", meta.behandler_suspendert)
                .with_input("behandlet_dato", iso_dato(sykmelding.behandlet_dato)),
        }
    }
}

static TRE: LazyLock<RuleNode<Behandler, Leaf>> = LazyLock::new(|| {
    RuleNode::decision(
        Behandler::BehandlerSuspendert,
        RuleNode::Result(Leaf::invalid(RuleHit {
            rule_name: tags::REGEL_BEHANDLER_SUSPENDERT.to_string(),
            message_for_sender: "Behandler er suspendert av NAV.".to_string(),
            message_for_user: "Sykmeldingen kan ikke benyttes fordi den som skrev den er \
                               suspendert."
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
            tags::TREE_BEHANDLER,
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
        key: tags::TREE_BEHANDLER,
        citation: Some(JuridiskHenvisning::ny(Lovverk::Folketrygdloven, "8-7").med_ledd(1)),
        run,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::NoopTrace;
    use crate::test_support::{metadata, sykmelding_enkel};
    use regelguard_types::Verdict;

    #[test]
    fn an_authorised_practitioner_passes() {
        let evaluation = run(&sykmelding_enkel(), &metadata(), &mut NoopTrace);
        assert_eq!(evaluation.verdict, Verdict::Ok);
        assert!(evaluation.rule_hit.is_none());
        assert_eq!(evaluation.path.len(), 1);
        assert!(!evaluation.path[0].outcome);
    }

    #[test]
    fn a_suspended_practitioner_is_invalid() {
        let mut meta = metadata();
        meta.behandler_suspendert = true;
        let evaluation = run(&sykmelding_enkel(), &meta, &mut NoopTrace);
        assert_eq!(evaluation.verdict, Verdict::Invalid);
        let hit = evaluation.rule_hit.unwrap();
        assert_eq!(hit.rule_name, "BEHANDLER_SUSPENDERT");
        assert!(hit.fingerprint.is_some());
    }

    #[test]
    fn the_consultation_date_is_recorded_as_input() {
        let mut meta = metadata();
        meta.behandler_suspendert = true;
        let evaluation = run(&sykmelding_enkel(), &meta, &mut NoopTrace);
        assert_eq!(evaluation.path[0].inputs["behandlet_dato"], "2026-02-02");
    }
}
