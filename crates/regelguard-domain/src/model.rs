//! The decoded certificate and the metadata the rules run against.
//!
//! Both are assembled outside this crate (the service decodes the
//! certificate, `regelguard-registries` resolves the metadata) and are
//! immutable for the duration of one evaluation.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// One absence period. `grad` is the certified reduction of working
/// capacity in percent; `None` means full absence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Periode {
    #[serde(with = "regelguard_types::serde_date")]
    pub fom: Date,
    #[serde(with = "regelguard_types::serde_date")]
    pub tom: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grad: Option<u8>,
}

impl Periode {
    /// Inclusive day count; a single-day period is 1.
    pub fn varighet_dager(&self) -> i64 {
        (self.tom - self.fom).whole_days() + 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnose {
    pub system: String,
    pub kode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tekst: Option<String>,
}

/// A decoded sick-leave certificate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sykmelding {
    pub id: String,
    pub pasient_ident: String,
    pub behandler_ident: String,
    pub perioder: Vec<Periode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoveddiagnose: Option<Diagnose>,
    /// When the practitioner saw the patient. Backdating is measured
    /// against this, not against signature or submission time.
    #[serde(with = "regelguard_types::serde_date")]
    pub behandlet_dato: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub signatur_dato: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub mottatt_dato: OffsetDateTime,
    /// Free-text justification for why the patient was not seen before the
    /// absence started. Read by the backdating rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begrunnelse_ikke_kontakt: Option<String>,
}

/// Reference to an earlier certificate's span, from the history registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodeRef {
    #[serde(with = "regelguard_types::serde_date")]
    pub fom: Date,
    #[serde(with = "regelguard_types::serde_date")]
    pub tom: Date,
}

/// Everything the rules need beyond the certificate itself, resolved
/// against the collaborating registries before evaluation starts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleMetadata {
    /// Missing birth date never errors inside the engine; the age rule is
    /// non-triggering without it.
    #[serde(default, with = "regelguard_types::serde_date::option")]
    pub pasient_fodselsdato: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legekontor_orgnr: Option<String>,
    /// The certificate was submitted before and rejected; this is a new
    /// attempt for the same absence.
    #[serde(default)]
    pub er_ettersending: bool,
    /// Resolved against the practitioner registry for `behandlet_dato`.
    #[serde(default)]
    pub behandler_suspendert: bool,
    #[serde(default)]
    pub tidligere_sykmeldinger: Vec<PeriodeRef>,
}
