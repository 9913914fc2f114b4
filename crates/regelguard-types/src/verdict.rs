//! Verdicts and their severity order, plus the legal-outcome classification
//! used by subsumsjon audit records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Outcome of evaluating one rule tree, and of a whole validation run.
///
/// The variants form a total severity order: `Ok` < `ManualProcessing` <
/// `Invalid`. Aggregation takes the maximum, so a single invalid tree makes
/// the whole certificate invalid. `ManualProcessing` is a first-class
/// outcome ("a caseworker has to look at this"), never an error path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Ok,
    ManualProcessing,
    Invalid,
}

impl Verdict {
    /// Numeric severity rank. Higher is worse.
    pub fn severity(self) -> u8 {
        match self {
            Verdict::Ok => 0,
            Verdict::ManualProcessing => 1,
            Verdict::Invalid => 2,
        }
    }
}

impl Ord for Verdict {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl PartialOrd for Verdict {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How a verdict reads against the cited statutory condition.
///
/// `Ok` means the condition was met, `Invalid` means it was not, and
/// anything in between is undetermined until a human has decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegalOutcome {
    VilkarOppfylt,
    VilkarIkkeOppfylt,
    VilkarUavklart,
}

impl LegalOutcome {
    pub fn from_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Ok => LegalOutcome::VilkarOppfylt,
            Verdict::Invalid => LegalOutcome::VilkarIkkeOppfylt,
            Verdict::ManualProcessing => LegalOutcome::VilkarUavklart,
        }
    }
}
