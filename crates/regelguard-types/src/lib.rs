//! Stable DTOs and identifiers used across the regelguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the validation result and its envelope
//! - the subsumsjon audit record emitted per legal citation
//! - stable rule tags and tree keys
//! - explain registry for rule guidance
//!
//! Nothing here evaluates anything; the engine lives in `regelguard-domain`.

#![forbid(unsafe_code)]

pub mod audit;
pub mod explain;
pub mod henvisning;
pub mod rule;
pub mod serde_date;
pub mod tags;
pub mod verdict;

pub use audit::{AuditRecord, AUDIT_EVENT_NAME, AUDIT_EVENT_VERSION, SCHEMA_AUDIT_V1};
pub use explain::{lookup_explanation, Explanation};
pub use henvisning::{JuridiskHenvisning, Lovverk};
pub use rule::{ResultEnvelope, RuleHit, RunSummary, ToolMeta, ValidationResult, SCHEMA_RESULT_V1};
pub use verdict::{LegalOutcome, Verdict};
