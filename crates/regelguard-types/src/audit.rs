//! The subsumsjon audit record.
//!
//! One record per citation-bearing rule tree per evaluation, whatever the
//! verdict. Trees without a citation never produce one. The record is the
//! legally meaningful trace: which statutory condition was assessed, on
//! which inputs, with which outcome.

use crate::henvisning::JuridiskHenvisning;
use crate::verdict::LegalOutcome;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use uuid::Uuid;

/// Event name shared with downstream legal-archive consumers.
pub const AUDIT_EVENT_NAME: &str = "subsumsjon";
/// Version of the event contract, not of this crate.
pub const AUDIT_EVENT_VERSION: &str = "1.0.0";
/// Stable schema identifier for the serialized record.
pub const SCHEMA_AUDIT_V1: &str = "regelguard.subsumsjon.v1";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditRecord {
    /// Unique per record; never reused across evaluations of the same
    /// certificate.
    #[schemars(with = "String")]
    pub id: Uuid,
    pub event_name: String,
    pub version: String,
    /// Which system produced the record, e.g. `"regelguard"`.
    pub kilde: String,
    /// Identity of the person the assessment concerns.
    pub person_ident: String,
    pub henvisning: JuridiskHenvisning,
    /// Named inputs the evaluation actually consumed, merged across the
    /// realized path in visitation order. Later writes win on key
    /// collisions.
    pub input: BTreeMap<String, JsonValue>,
    pub utfall: LegalOutcome,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub tidsstempel: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::henvisning::Lovverk;
    use time::macros::datetime;

    fn record() -> AuditRecord {
        AuditRecord {
            id: Uuid::nil(),
            event_name: AUDIT_EVENT_NAME.to_string(),
            version: AUDIT_EVENT_VERSION.to_string(),
            kilde: "regelguard".to_string(),
            person_ident: "12345678901".to_string(),
            henvisning: JuridiskHenvisning::ny(Lovverk::Folketrygdloven, "8-7").med_ledd(2),
            input: BTreeMap::from([
                ("behandlet_dato".to_string(), JsonValue::from("2026-02-10")),
                ("dager_tilbakedatert".to_string(), JsonValue::from(12)),
            ]),
            utfall: LegalOutcome::VilkarUavklart,
            tidsstempel: datetime!(2026-02-10 12:00:00 UTC),
        }
    }

    #[test]
    fn serializes_with_stable_field_names() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["event_name"], "subsumsjon");
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["kilde"], "regelguard");
        assert_eq!(json["utfall"], "VILKAR_UAVKLART");
        assert_eq!(json["tidsstempel"], "2026-02-10T12:00:00Z");
        assert_eq!(json["input"]["dager_tilbakedatert"], 12);
    }

    #[test]
    fn round_trips() {
        let original = record();
        let json = serde_json::to_string(&original).unwrap();
        let back: AuditRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
