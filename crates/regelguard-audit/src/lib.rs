//! Binding rule-tree runs to subsumsjon audit records.
//!
//! A subsumsjon is the application of one statutory condition to one set of
//! facts. Every tree registered with a legal citation produces exactly one
//! record per evaluation, whatever its verdict; trees without a citation
//! produce none. Building records is pure; publishing them goes through
//! [`AuditPublisher`] so callers choose the transport.

#![forbid(unsafe_code)]

mod publish;
mod record;

pub use publish::{publish_all, AuditPublisher, NdjsonWriter, PublishError, VecPublisher};
pub use record::to_audit_records;
