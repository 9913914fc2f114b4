//! Stable identifiers for rule trees and rule tags.
//!
//! Tree keys are a dotted namespace used in configuration and logs. Rule
//! tags are the SCREAMING_SNAKE names surfaced in rule hits and audit
//! tooling; they are part of the external contract and must never be
//! renamed.

// Tree keys
pub const TREE_PASIENTALDER: &str = "sykmelding.pasientalder";
pub const TREE_GRADERING: &str = "sykmelding.gradering";
pub const TREE_PERIODE: &str = "sykmelding.periode";
pub const TREE_TILBAKEDATERING: &str = "sykmelding.tilbakedatering";
pub const TREE_BEHANDLER: &str = "sykmelding.behandler";

// Tags: sykmelding.pasientalder
pub const REGEL_PASIENT_ELDRE_ENN_70: &str = "PASIENT_ELDRE_ENN_70";

// Tags: sykmelding.gradering
pub const REGEL_GRADE_BELOW_20: &str = "GRADE_BELOW_20";

// Tags: sykmelding.periode
pub const REGEL_PERIODER_MANGLER: &str = "PERIODER_MANGLER";
pub const REGEL_FRADATO_ETTER_TILDATO: &str = "FRADATO_ETTER_TILDATO";
pub const REGEL_OVERLAPPENDE_PERIODER: &str = "OVERLAPPENDE_PERIODER";
pub const REGEL_OPPHOLD_MELLOM_PERIODER: &str = "OPPHOLD_MELLOM_PERIODER";
pub const REGEL_TOTAL_VARIGHET_OVER_ETT_AR: &str = "TOTAL_VARIGHET_OVER_ETT_AR";

// Tags: sykmelding.tilbakedatering
pub const REGEL_ETTERSENDING: &str = "ETTERSENDING";
pub const REGEL_TILBAKEDATERT_MER_ENN_3_AR: &str = "TILBAKEDATERT_MER_ENN_3_AR";
pub const REGEL_FORLENGELSE: &str = "FORLENGELSE";
pub const REGEL_TILBAKEDATERT_INNTIL_8_DAGER: &str = "TILBAKEDATERT_INNTIL_8_DAGER";
pub const REGEL_TILBAKEDATERT_MED_BEGRUNNELSE: &str = "TILBAKEDATERT_MED_BEGRUNNELSE";

// Tags: sykmelding.behandler
pub const REGEL_BEHANDLER_SUSPENDERT: &str = "BEHANDLER_SUSPENDERT";
