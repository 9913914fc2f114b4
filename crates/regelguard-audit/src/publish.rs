//! Publishing subsumsjon records.
//!
//! The binder produces records; a publisher hands them to a transport. The
//! CLI uses [`NdjsonWriter`] over a file, services plug in their own
//! implementation, tests use [`VecPublisher`].

use regelguard_types::AuditRecord;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The underlying transport refused the record.
    #[error("failed to write audit record: {0}")]
    Io(#[from] std::io::Error),
    /// The record could not be serialized.
    #[error("failed to serialize audit record: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait AuditPublisher {
    fn publish(&mut self, record: &AuditRecord) -> Result<(), PublishError>;
}

/// In-memory publisher for tests and dry runs.
#[derive(Debug, Default)]
pub struct VecPublisher {
    pub records: Vec<AuditRecord>,
}

impl AuditPublisher for VecPublisher {
    fn publish(&mut self, record: &AuditRecord) -> Result<(), PublishError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// One JSON object per line, the shape the legal archive ingests.
pub struct NdjsonWriter<W> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AuditPublisher for NdjsonWriter<W> {
    fn publish(&mut self, record: &AuditRecord) -> Result<(), PublishError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Publish every record in order, stopping at the first failure.
pub fn publish_all(
    publisher: &mut dyn AuditPublisher,
    records: &[AuditRecord],
) -> Result<(), PublishError> {
    for record in records {
        publisher.publish(record)?;
    }
    tracing::debug!(count = records.len(), "subsumsjon records published");
    Ok(())
}
