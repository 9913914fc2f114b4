//! Backdating rules, ftrl. § 8-7 2. ledd. The deepest of the trees: a
//! certificate written after the absence started is acceptable when it is a
//! resend, a continuation of a known certificate, or backdated by at most
//! eight days. Beyond that a written justification sends it to manual
//! review, and its absence makes the certificate unusable. Backdating past
//! three years is rejected outright.

use crate::aggregate::{ConfiguredTree, TreeEvaluation};
use crate::evaluate::{evaluate, TraceSink};
use crate::model::{RuleMetadata, Sykmelding};
use crate::predicates::{PredicateOutcome, PredicateSet};
use crate::tree::{Leaf, RuleId, RuleNode};
use crate::trees::utils::{dager_mellom, forste_periode, iso_dato, pluss_ar, pluss_dager};
use regelguard_types::{tags, JuridiskHenvisning, Lovverk, RuleHit};
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tilbakedatering {
    Ettersending,
    TilbakedatertMerEnn3Ar,
    Forlengelse,
    TilbakedatertInntil8Dager,
    TilbakedatertMedBegrunnelse,
}

impl RuleId for Tilbakedatering {
    fn tag(self) -> &'static str {
        match self {
            Tilbakedatering::Ettersending => tags::REGEL_ETTERSENDING,
            Tilbakedatering::TilbakedatertMerEnn3Ar => tags::REGEL_TILBAKEDATERT_MER_ENN_3_AR,
            Tilbakedatering::Forlengelse => tags::REGEL_FORLENGELSE,
            Tilbakedatering::TilbakedatertInntil8Dager => tags::REGEL_TILBAKEDATERT_INNTIL_8_DAGER,
            Tilbakedatering::TilbakedatertMedBegrunnelse => {
                tags::REGEL_TILBAKEDATERT_MED_BEGRUNNELSE
            }
        }
    }
}

struct Predikater;

impl PredicateSet<Tilbakedatering> for Predikater {
    fn evaluate(
        &self,
        id: Tilbakedatering,
        sykmelding: &Sykmelding,
        meta: &RuleMetadata,
    ) -> PredicateOutcome {
        match id {
            Tilbakedatering::Ettersending => ettersending(meta),
            Tilbakedatering::TilbakedatertMerEnn3Ar => mer_enn_tre_ar(sykmelding),
            Tilbakedatering::Forlengelse => forlengelse(sykmelding, meta),
            Tilbakedatering::TilbakedatertInntil8Dager => inntil_atte_dager(sykmelding),
            Tilbakedatering::TilbakedatertMedBegrunnelse => med_begrunnelse(sykmelding),
        }
    }
}

fn ettersending(meta: &RuleMetadata) -> PredicateOutcome {
    PredicateOutcome::new(meta.er_ettersending).with_input("er_ettersending", meta.er_ettersending)
}

/// Written more than three full years after the absence started.
fn mer_enn_tre_ar(sykmelding: &Sykmelding) -> PredicateOutcome {
    let Some(forste) = forste_periode(&sykmelding.perioder) else {
        return PredicateOutcome::new(false);
    };
    let grense = pluss_ar(forste.fom, 3);
    PredicateOutcome::new(sykmelding.behandlet_dato > grense)
        .with_input("forste_fom_dato", iso_dato(forste.fom))
        .with_input("behandlet_dato", iso_dato(sykmelding.behandlet_dato))
        .with_input("grense_dato", iso_dato(grense))
}

/// Continuation: the new certificate starts inside, or the day after, a
/// previously registered one.
fn forlengelse(sykmelding: &Sykmelding, meta: &RuleMetadata) -> PredicateOutcome {
    let Some(forste) = forste_periode(&sykmelding.perioder) else {
        return PredicateOutcome::new(false);
    };
    let forlenger = meta
        .tidligere_sykmeldinger
        .iter()
        .any(|prior| forste.fom >= prior.fom && forste.fom <= pluss_dager(prior.tom, 1));
    PredicateOutcome::new(forlenger)
        .with_input("forste_fom_dato", iso_dato(forste.fom))
        .with_input("antall_tidligere", meta.tidligere_sykmeldinger.len())
}

/// At most eight days between the start of the absence and the
/// consultation. Covers certificates that are not backdated at all.
fn inntil_atte_dager(sykmelding: &Sykmelding) -> PredicateOutcome {
    let Some(forste) = forste_periode(&sykmelding.perioder) else {
        return PredicateOutcome::new(true);
    };
    let dager = dager_mellom(forste.fom, sykmelding.behandlet_dato);
    PredicateOutcome::new(dager <= 8)
        .with_input("forste_fom_dato", iso_dato(forste.fom))
        .with_input("behandlet_dato", iso_dato(sykmelding.behandlet_dato))
        .with_input("dager_tilbakedatert", dager)
}

fn med_begrunnelse(sykmelding: &Sykmelding) -> PredicateOutcome {
    let har_begrunnelse = sykmelding
        .begrunnelse_ikke_kontakt
        .as_deref()
        .is_some_and(|b| !b.trim().is_empty());
    PredicateOutcome::new(har_begrunnelse).with_input("har_begrunnelse", har_begrunnelse)
}

static TRE: LazyLock<RuleNode<Tilbakedatering, Leaf>> = LazyLock::new(|| {
    RuleNode::decision(
        Tilbakedatering::Ettersending,
        RuleNode::Result(Leaf::ok()),
        RuleNode::decision(
            Tilbakedatering::TilbakedatertMerEnn3Ar,
            RuleNode::Result(Leaf::invalid(RuleHit {
                rule_name: tags::REGEL_TILBAKEDATERT_MER_ENN_3_AR.to_string(),
                message_for_sender: "Sykmeldingen er tilbakedatert mer enn 3 år.".to_string(),
                message_for_user: "Sykmeldingen kan ikke benyttes fordi den er tilbakedatert \
                                   mer enn 3 år."
                    .to_string(),
                fingerprint: None,
            })),
            RuleNode::decision(
                Tilbakedatering::Forlengelse,
                RuleNode::Result(Leaf::ok()),
                RuleNode::decision(
                    Tilbakedatering::TilbakedatertInntil8Dager,
                    RuleNode::Result(Leaf::ok()),
                    RuleNode::decision(
                        Tilbakedatering::TilbakedatertMedBegrunnelse,
                        RuleNode::Result(Leaf::manual(RuleHit {
                            rule_name: tags::REGEL_TILBAKEDATERT_MED_BEGRUNNELSE.to_string(),
                            message_for_sender: "Sykmeldingen er tilbakedatert mer enn 8 dager \
                                                 med begrunnelse."
                                .to_string(),
                            message_for_user: "Sykmeldingen er tilbakedatert. Begrunnelsen må \
                                               vurderes før sykmeldingen kan benyttes."
                                .to_string(),
                            fingerprint: None,
                        })),
                        RuleNode::Result(Leaf::invalid(RuleHit {
                            rule_name: tags::REGEL_TILBAKEDATERT_MED_BEGRUNNELSE.to_string(),
                            message_for_sender: "Sykmeldingen er tilbakedatert mer enn 8 dager \
                                                 uten begrunnelse."
                                .to_string(),
                            message_for_user: "Sykmeldingen kan ikke benyttes fordi den er \
                                               tilbakedatert uten begrunnelse."
                                .to_string(),
                            fingerprint: None,
                        })),
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
            tags::TREE_TILBAKEDATERING,
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
        key: tags::TREE_TILBAKEDATERING,
        citation: Some(JuridiskHenvisning::ny(Lovverk::Folketrygdloven, "8-7").med_ledd(2)),
        run,
    }
}
