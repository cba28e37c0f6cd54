//! Bus audit trail.
//!
//! Each synthesized event is traced through the bus as it would be in
//! production: the producer publishes it, the bus delivers it to every
//! downstream consumer in order, and analytics recomputes the KPIs. Every
//! step becomes one [`AuditRecord`], written as a JSON line.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use nzheb_types::{AuditAction, AuditRecord, AuditStatus, EventInstance};
use tracing::debug;

/// Name the bus uses for itself in audit records.
pub const BUS_NAME: &str = "nzheb";

/// Analytics service that recomputes KPIs after delivery.
pub const KPI_SERVICE: &str = "tpo-analytics";

/// Errors raised while writing the audit trail.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// Writing to the sink failed.
    #[error("audit write failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("audit record serialization failed: {source}")]
    Serialize {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// The publish, deliver, and KPI-compute records for one event.
pub fn fanout_records(event: &EventInstance, at: DateTime<Utc>) -> Vec<AuditRecord> {
    let record = |producer: &str, consumer: &str, action: AuditAction| AuditRecord {
        timestamp: at,
        event_id: event.id,
        producer: producer.to_owned(),
        consumer: consumer.to_owned(),
        action,
        status: AuditStatus::Ok,
    };

    let mut records = Vec::with_capacity(event.template.consumers.len().saturating_add(2));
    records.push(record(&event.template.producer, BUS_NAME, AuditAction::Publish));
    records.extend(
        event
            .template
            .consumers
            .iter()
            .map(|consumer| record(BUS_NAME, consumer, AuditAction::Deliver)),
    );
    records.push(record(KPI_SERVICE, KPI_SERVICE, AuditAction::ComputeKpi));
    records
}

/// Append-only JSON-lines sink for audit records.
pub struct AuditTrail {
    sink: Box<dyn Write + Send>,
    written: u64,
}

impl AuditTrail {
    /// Wrap an arbitrary writer.
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self { sink, written: 0 }
    }

    /// Open `path` for appending, creating it and its parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Io`] if the directory or file cannot be created.
    pub fn open(path: &Path) -> Result<Self, AuditError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }

    /// Write the full fan-out for `event`. Returns the number of records
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] if serialization or the write fails.
    pub fn record_fanout(&mut self, event: &EventInstance) -> Result<usize, AuditError> {
        let records = fanout_records(event, Utc::now());
        for record in &records {
            serde_json::to_writer(&mut self.sink, record)?;
            self.sink.write_all(b"\n")?;
        }
        self.sink.flush()?;
        let count = records.len();
        self.written = self
            .written
            .saturating_add(u64::try_from(count).unwrap_or(u64::MAX));
        debug!(event_id = %event.id, records = count, "Audit fan-out written");
        Ok(count)
    }

    /// Records written since the trail was opened.
    pub const fn written(&self) -> u64 {
        self.written
    }
}

impl core::fmt::Debug for AuditTrail {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuditTrail")
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}
