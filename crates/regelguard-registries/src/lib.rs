//! Collaborator interfaces for the data the rule trees need but the
//! certificate does not carry: the patient's birth date, the
//! practitioner's suspension status, and the patient's certificate
//! history.
//!
//! The engine itself never talks to a registry. Callers assemble a
//! [`RuleMetadata`](regelguard_domain::model::RuleMetadata) up front via
//! [`build_rule_metadata`] and hand it to evaluation; a registry failure
//! is the caller's problem, surfaced before any rule runs. The engine
//! does not retry, cache or reinterpret these errors.

#![forbid(unsafe_code)]

use regelguard_domain::model::{PeriodeRef, RuleMetadata, Sykmelding};
use time::Date;

type UpstreamError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The person registry has no entry for the given identity.
    #[error("person not found in registry: {ident}")]
    PersonNotFound { ident: String },
    /// The suspension registry could not answer.
    #[error("suspension lookup unavailable")]
    SuspensionUnavailable {
        #[source]
        source: Option<UpstreamError>,
    },
    /// The certificate history could not answer.
    #[error("certificate history unavailable")]
    HistoryUnavailable {
        #[source]
        source: Option<UpstreamError>,
    },
}

pub trait PersonRegistry {
    fn birth_date(&self, ident: &str) -> Result<Date, RegistryError>;
}

pub trait SuspensionRegistry {
    /// Whether the practitioner's authorisation was suspended on the
    /// given date.
    fn is_suspended(&self, behandler_ident: &str, on: Date) -> Result<bool, RegistryError>;
}

pub trait CertificateHistory {
    /// Previously accepted certificates for the patient, as bare period
    /// references. Order is not significant.
    fn prior_certificates(&self, ident: &str) -> Result<Vec<PeriodeRef>, RegistryError>;
}

/// Assemble the engine input from the collaborators. Registry failures
/// propagate unchanged.
///
/// `er_ettersending` comes from the message envelope, not a registry, so
/// the caller passes it through. The practice identifier
/// (`legekontor_orgnr`) has no registry either; callers that know it set
/// it on the returned value.
pub fn build_rule_metadata(
    sykmelding: &Sykmelding,
    person: &impl PersonRegistry,
    suspension: &impl SuspensionRegistry,
    history: &impl CertificateHistory,
    er_ettersending: bool,
) -> Result<RuleMetadata, RegistryError> {
    let fodselsdato = person.birth_date(&sykmelding.pasient_ident)?;
    let behandler_suspendert =
        suspension.is_suspended(&sykmelding.behandler_ident, sykmelding.behandlet_dato)?;
    let tidligere_sykmeldinger = history.prior_certificates(&sykmelding.pasient_ident)?;
    tracing::debug!(
        pasient_ident = %sykmelding.pasient_ident,
        behandler_suspendert,
        tidligere = tidligere_sykmeldinger.len(),
        "rule metadata assembled"
    );
    Ok(RuleMetadata {
        pasient_fodselsdato: Some(fodselsdato),
        legekontor_orgnr: None,
        er_ettersending,
        behandler_suspendert,
        tidligere_sykmeldinger,
    })
}

mod staticreg;

pub use staticreg::StaticRegistry;
