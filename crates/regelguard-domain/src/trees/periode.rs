//! Structural checks on the absence periods. No statutory citation: these
//! are administrative consistency rules, and the tree is the one that
//! exercises the citation-less path through the audit layer.

use crate::aggregate::{ConfiguredTree, TreeEvaluation};
use crate::evaluate::{evaluate, TraceSink};
use crate::model::{RuleMetadata, Sykmelding};
use crate::predicates::{PredicateOutcome, PredicateSet};
use crate::tree::{Leaf, RuleId, RuleNode};
use crate::trees::utils::{
    dager_mellom, forste_periode, har_opphold, har_overlapp, iso_dato, siste_periode,
};
use regelguard_types::{tags, RuleHit};
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodeRegel {
    PerioderMangler,
    FradatoEtterTildato,
    OverlappendePerioder,
    OppholdMellomPerioder,
    TotalVarighetOverEttAr,
}

impl RuleId for PeriodeRegel {
    fn tag(self) -> &'static str {
        match self {
            PeriodeRegel::PerioderMangler => tags::REGEL_PERIODER_MANGLER,
            PeriodeRegel::FradatoEtterTildato => tags::REGEL_FRADATO_ETTER_TILDATO,
            PeriodeRegel::OverlappendePerioder => tags::REGEL_OVERLAPPENDE_PERIODER,
            PeriodeRegel::OppholdMellomPerioder => tags::REGEL_OPPHOLD_MELLOM_PERIODER,
            PeriodeRegel::TotalVarighetOverEttAr => tags::REGEL_TOTAL_VARIGHET_OVER_ETT_AR,
        }
    }
}

struct Predikater;

impl PredicateSet<PeriodeRegel> for Predikater {
    fn evaluate(
        &self,
        id: PeriodeRegel,
        sykmelding: &Sykmelding,
        _meta: &RuleMetadata,
    ) -> PredicateOutcome {
        match id {
            PeriodeRegel::PerioderMangler => perioder_mangler(sykmelding),
            PeriodeRegel::FradatoEtterTildato => fradato_etter_tildato(sykmelding),
            PeriodeRegel::OverlappendePerioder => overlappende_perioder(sykmelding),
            PeriodeRegel::OppholdMellomPerioder => opphold_mellom_perioder(sykmelding),
            PeriodeRegel::TotalVarighetOverEttAr => total_varighet_over_ett_ar(sykmelding),
        }
    }
}

fn perioder_mangler(sykmelding: &Sykmelding) -> PredicateOutcome {
    PredicateOutcome::new(sykmelding.perioder.is_empty())
        .with_input("antall_perioder", sykmelding.perioder.len())
}

fn fradato_etter_tildato(sykmelding: &Sykmelding) -> PredicateOutcome {
    let offending = sykmelding.perioder.iter().find(|p| p.fom > p.tom);
    match offending {
        Some(periode) => PredicateOutcome::new(true)
            .with_input("fom", iso_dato(periode.fom))
            .with_input("tom", iso_dato(periode.tom)),
        None => PredicateOutcome::new(false),
    }
}

fn overlappende_perioder(sykmelding: &Sykmelding) -> PredicateOutcome {
    PredicateOutcome::new(har_overlapp(&sykmelding.perioder))
        .with_input("antall_perioder", sykmelding.perioder.len())
}

fn opphold_mellom_perioder(sykmelding: &Sykmelding) -> PredicateOutcome {
    PredicateOutcome::new(har_opphold(&sykmelding.perioder))
        .with_input("antall_perioder", sykmelding.perioder.len())
}

/// Span from earliest fom to latest tom, strictly more than 365 days.
fn total_varighet_over_ett_ar(sykmelding: &Sykmelding) -> PredicateOutcome {
    let (Some(forste), Some(siste)) = (
        forste_periode(&sykmelding.perioder),
        siste_periode(&sykmelding.perioder),
    ) else {
        return PredicateOutcome::new(false);
    };
    let total_dager = dager_mellom(forste.fom, siste.tom);
    PredicateOutcome::new(total_dager > 365)
        .with_input("forste_fom_dato", iso_dato(forste.fom))
        .with_input("siste_tom_dato", iso_dato(siste.tom))
        .with_input("total_dager", total_dager)
}

fn ugyldig(tag: &str, melding_avsender: &str, melding_bruker: &str) -> RuleNode<PeriodeRegel, Leaf> {
    RuleNode::Result(Leaf::invalid(RuleHit {
        rule_name: tag.to_string(),
        message_for_sender: melding_avsender.to_string(),
        message_for_user: melding_bruker.to_string(),
        fingerprint: None,
    }))
}

static TRE: LazyLock<RuleNode<PeriodeRegel, Leaf>> = LazyLock::new(|| {
    RuleNode::decision(
        PeriodeRegel::PerioderMangler,
        ugyldig(
            tags::REGEL_PERIODER_MANGLER,
            "Sykmeldingen mangler perioder.",
            "Sykmeldingen kan ikke benyttes fordi den mangler sykmeldingsperioder.",
        ),
        RuleNode::decision(
            PeriodeRegel::FradatoEtterTildato,
            ugyldig(
                tags::REGEL_FRADATO_ETTER_TILDATO,
                "Fra-dato er etter til-dato i en periode.",
                "Sykmeldingen kan ikke benyttes fordi en periode slutter før den starter.",
            ),
            RuleNode::decision(
                PeriodeRegel::OverlappendePerioder,
                ugyldig(
                    tags::REGEL_OVERLAPPENDE_PERIODER,
                    "Periodene overlapper hverandre.",
                    "Sykmeldingen kan ikke benyttes fordi periodene overlapper.",
                ),
                RuleNode::decision(
                    PeriodeRegel::OppholdMellomPerioder,
                    ugyldig(
                        tags::REGEL_OPPHOLD_MELLOM_PERIODER,
                        "Det er opphold mellom periodene.",
                        "Sykmeldingen kan ikke benyttes fordi det er dager uten sykmelding \
                         mellom periodene.",
                    ),
                    RuleNode::decision(
                        PeriodeRegel::TotalVarighetOverEttAr,
                        ugyldig(
                            tags::REGEL_TOTAL_VARIGHET_OVER_ETT_AR,
                            "Sykmeldingen dekker mer enn ett år.",
                            "Sykmeldingen kan ikke benyttes fordi den dekker en periode på \
                             over ett år.",
                        ),
                        RuleNode::Result(Leaf::ok()),
                    ),
                ),
            ),
        ),
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
            tags::TREE_PERIODE,
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
        key: tags::TREE_PERIODE,
        citation: None,
        run,
    }
}
