//! Use case orchestration for regelguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, audit, and
//! settings layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod explain;
mod summary;
mod validate;

pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use summary::format_summary;
pub use validate::{
    audit_records_ndjson, run_validate, serialize_result, verdict_exit_code, ValidateInput,
    ValidateOutput,
};
