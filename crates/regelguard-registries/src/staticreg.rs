//! In-memory registry for tests and offline CLI runs.

use crate::{CertificateHistory, PersonRegistry, RegistryError, SuspensionRegistry};
use regelguard_domain::model::PeriodeRef;
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// Implements all three collaborator traits over owned maps. Suspension
/// is modelled as a flat set of practitioner identities; the lookup date
/// is accepted and ignored.
#[derive(Clone, Debug, Default)]
pub struct StaticRegistry {
    fodselsdatoer: BTreeMap<String, Date>,
    suspenderte: BTreeSet<String>,
    historikk: BTreeMap<String, Vec<PeriodeRef>>,
}

impl StaticRegistry {
    pub fn med_fodselsdato(mut self, ident: &str, fodselsdato: Date) -> Self {
        self.fodselsdatoer.insert(ident.to_string(), fodselsdato);
        self
    }

    pub fn med_suspendert(mut self, behandler_ident: &str) -> Self {
        self.suspenderte.insert(behandler_ident.to_string());
        self
    }

    pub fn med_historikk(mut self, ident: &str, perioder: Vec<PeriodeRef>) -> Self {
        self.historikk.insert(ident.to_string(), perioder);
        self
    }
}

impl PersonRegistry for StaticRegistry {
    fn birth_date(&self, ident: &str) -> Result<Date, RegistryError> {
        self.fodselsdatoer
            .get(ident)
            .copied()
            .ok_or_else(|| RegistryError::PersonNotFound {
                ident: ident.to_string(),
            })
    }
}

impl SuspensionRegistry for StaticRegistry {
    fn is_suspended(&self, behandler_ident: &str, _on: Date) -> Result<bool, RegistryError> {
        Ok(self.suspenderte.contains(behandler_ident))
    }
}

impl CertificateHistory for StaticRegistry {
    fn prior_certificates(&self, ident: &str) -> Result<Vec<PeriodeRef>, RegistryError> {
        Ok(self.historikk.get(ident).cloned().unwrap_or_default())
    }
}
