//! Rule hits, the validation result, and the envelope the CLI writes.

use crate::verdict::Verdict;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for the result envelope.
pub const SCHEMA_RESULT_V1: &str = "regelguard.result.v1";

/// One triggered rule: which rule, and what to tell whom.
///
/// Hits are only attached to failing terminals; an `OK` evaluation carries
/// none. `message_for_sender` goes back to the submitting system (the
/// practitioner's EHR), `message_for_user` is phrased for the patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleHit {
    /// Stable rule tag, see [`crate::tags`]. Renaming one is a breaking change.
    pub rule_name: String,
    pub message_for_sender: String,
    pub message_for_user: String,

    /// Stable identifier intended for dedup and trending. Typically a hash
    /// of `rule_name + subject identity + salient dates`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// The answer the surrounding service returns to the submitter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub status: Verdict,
    /// Hits from every tree that reached the overall status, in declared
    /// tree order. Empty when `status` is `OK`.
    pub rule_hits: Vec<RuleHit>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        ValidationResult {
            status: Verdict::Ok,
            rule_hits: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Run counters for the envelope payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct RunSummary {
    pub profile: String,
    pub trees_evaluated: u32,
    pub trees_skipped: u32,
    pub audit_records: u32,
}

/// Versioned outer shape for the result artifact.
///
/// The envelope keeps the result itself untouched while giving consumers a
/// stable place for schema id, tool identity and run timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResultEnvelope {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub result: ValidationResult,
    pub data: RunSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_result_has_no_hits() {
        let result = ValidationResult::ok();
        assert_eq!(result.status, Verdict::Ok);
        assert!(result.rule_hits.is_empty());
    }

    #[test]
    fn fingerprint_is_omitted_when_absent() {
        let hit = RuleHit {
            rule_name: "PASIENT_ELDRE_ENN_70".to_string(),
            message_for_sender: "Pasienten er over 70 år.".to_string(),
            message_for_user: "Du er over 70 år.".to_string(),
            fingerprint: None,
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert!(json.get("fingerprint").is_none());
    }

    #[test]
    fn result_round_trips() {
        let result = ValidationResult {
            status: Verdict::Invalid,
            rule_hits: vec![RuleHit {
                rule_name: "GRADE_BELOW_20".to_string(),
                message_for_sender: "Graden er under 20 %.".to_string(),
                message_for_user: "Sykmeldingsgraden er for lav.".to_string(),
                fingerprint: Some("abc123".to_string()),
            }],
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
