//! Fixture builders shared by unit, property and downstream crate tests.

use crate::model::{Periode, PeriodeRef, RuleMetadata, Sykmelding};
use crate::policy::{AuditPolicy, EffectiveConfig, TreePolicy};
use regelguard_types::tags;
use std::collections::BTreeMap;
use time::macros::{date, datetime};
use time::Date;

pub fn periode(fom: Date, tom: Date, grad: Option<u8>) -> Periode {
    Periode { fom, tom, grad }
}

/// A certificate with the given periods, treated on the first absence day
/// so the backdating rules stay quiet.
pub fn sykmelding(perioder: Vec<Periode>) -> Sykmelding {
    let behandlet = perioder
        .iter()
        .map(|p| p.fom)
        .min()
        .unwrap_or(date!(2026 - 02 - 02));
    sykmelding_behandlet(perioder, behandlet)
}

pub fn sykmelding_behandlet(perioder: Vec<Periode>, behandlet_dato: Date) -> Sykmelding {
    Sykmelding {
        id: "sm-1".to_string(),
        pasient_ident: "12345678901".to_string(),
        behandler_ident: "hpr-100".to_string(),
        perioder,
        hoveddiagnose: None,
        behandlet_dato,
        signatur_dato: datetime!(2026-02-02 08:30:00 UTC),
        mottatt_dato: datetime!(2026-02-02 08:31:00 UTC),
        begrunnelse_ikke_kontakt: None,
    }
}

/// One full-absence week starting 2026-02-02.
pub fn sykmelding_enkel() -> Sykmelding {
    sykmelding(vec![periode(
        date!(2026 - 02 - 02),
        date!(2026 - 02 - 08),
        None,
    )])
}

/// Metadata for a patient born 1980-01-15: nothing triggers.
pub fn metadata() -> RuleMetadata {
    metadata_fodt(date!(1980 - 01 - 15))
}

pub fn metadata_fodt(fodselsdato: Date) -> RuleMetadata {
    RuleMetadata {
        pasient_fodselsdato: Some(fodselsdato),
        legekontor_orgnr: Some("974600123".to_string()),
        er_ettersending: false,
        behandler_suspendert: false,
        tidligere_sykmeldinger: Vec::new(),
    }
}

pub fn tidligere(fom: Date, tom: Date) -> PeriodeRef {
    PeriodeRef { fom, tom }
}

pub fn config_all_enabled() -> EffectiveConfig {
    let mut trees = BTreeMap::new();
    for key in [
        tags::TREE_PERIODE,
        tags::TREE_PASIENTALDER,
        tags::TREE_GRADERING,
        tags::TREE_TILBAKEDATERING,
        tags::TREE_BEHANDLER,
    ] {
        trees.insert(key.to_string(), TreePolicy::enabled());
    }
    EffectiveConfig {
        profile: "test".to_string(),
        audit: AuditPolicy {
            enabled: true,
            kilde: "regelguard".to_string(),
        },
        trees,
    }
}

pub fn config_without(key: &str) -> EffectiveConfig {
    let mut cfg = config_all_enabled();
    cfg.trees.insert(key.to_string(), TreePolicy::disabled());
    cfg
}
