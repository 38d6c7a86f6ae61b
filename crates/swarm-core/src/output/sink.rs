//! Metrics Sink
//!
//! Append-only JSONL metrics logging. The sink is fire-and-forget: the
//! simulation emits records and never depends on what happens to them.

use bevy_ecs::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use swarm_events::MetricsRecord;

/// Sink error type
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resource for logging metric records to a JSONL file
#[derive(Resource)]
pub struct MetricsSink {
    writer: Option<BufWriter<File>>,
    record_count: u64,
}

impl MetricsSink {
    /// Create a new sink writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            record_count: 0,
        })
    }

    /// Create a sink that discards records (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            record_count: 0,
        }
    }

    /// Get the current record count
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Log a record to the file
    pub fn log(&mut self, record: &MetricsRecord) -> Result<(), SinkError> {
        self.record_count += 1;
        if let Some(ref mut writer) = self.writer {
            let line = record.to_jsonl()?;
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }

    /// Log multiple records
    pub fn log_batch(&mut self, records: &[MetricsRecord]) -> Result<(), SinkError> {
        for record in records {
            self.log(record)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for MetricsSink {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush metrics sink: {}", e);
        }
    }
}
