//! Patient age: no sickness benefit for absence starting after the
//! patient turned 70.

use crate::aggregate::{ConfiguredTree, TreeEvaluation};
use crate::evaluate::{evaluate, TraceSink};
use crate::model::{RuleMetadata, Sykmelding};
use crate::predicates::{PredicateOutcome, PredicateSet};
use crate::tree::{Leaf, RuleId, RuleNode};
use crate::trees::utils::{forste_periode, iso_dato, pluss_ar};
use regelguard_types::{tags, JuridiskHenvisning, Lovverk, RuleHit};
use serde_json::Value as JsonValue;
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasientAlder {
    PasientEldreEnn70,
}

impl RuleId for PasientAlder {
    fn tag(self) -> &'static str {
        match self {
            PasientAlder::PasientEldreEnn70 => tags::REGEL_PASIENT_ELDRE_ENN_70,
        }
    }
}

struct Predikater;

impl PredicateSet<PasientAlder> for Predikater {
    fn evaluate(
        &self,
        id: PasientAlder,
        sykmelding: &Sykmelding,
        meta: &RuleMetadata,
    ) -> PredicateOutcome {
        match id {
            PasientAlder::PasientEldreEnn70 => pasient_eldre_enn_70(sykmelding, meta),
        }
    }
}

/// Strictly more than 70 years between birth date and the first absence
/// day: the 70th birthday itself still passes. Missing birth date or an
/// empty period list cannot trigger the rule.
fn pasient_eldre_enn_70(sykmelding: &Sykmelding, meta: &RuleMetadata) -> PredicateOutcome {
    let (Some(fodselsdato), Some(forste)) = (
        meta.pasient_fodselsdato,
        forste_periode(&sykmelding.perioder),
    ) else {
        return PredicateOutcome::new(false).with_input(
            "pasient_fodselsdato",
            meta.pasient_fodselsdato
                .map(iso_dato)
                .map_or(JsonValue::Null, JsonValue::from),
        );
    };

    let syttiarsdag = pluss_ar(fodselsdato, 70);
    PredicateOutcome::new(forste.fom > syttiarsdag)
        .with_input("pasient_fodselsdato", iso_dato(fodselsdato))
        .with_input("forste_fom_dato", iso_dato(forste.fom))
        .with_input("syttiarsdag", iso_dato(syttiarsdag))
}

static TRE: LazyLock<RuleNode<PasientAlder, Leaf>> = LazyLock::new(|| {
    RuleNode::decision(
        PasientAlder::PasientEldreEnn70,
        RuleNode::Result(Leaf::invalid(RuleHit {
            rule_name: tags::REGEL_PASIENT_ELDRE_ENN_70.to_string(),
            message_for_sender: "Sykmeldingen kan ikke benyttes. Pasienten er over 70 år."
                .to_string(),
            message_for_user:
                "Sykmeldingen kan dessverre ikke benyttes fordi du er over 70 år. \
                 Du kan ha rett til andre ytelser."
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
            tags::TREE_PASIENTALDER,
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
        key: tags::TREE_PASIENTALDER,
        citation: Some(
            JuridiskHenvisning::ny(Lovverk::Folketrygdloven, "8-3")
                .med_ledd(1)
                .med_punktum(2),
        ),
        run,
    }
}
