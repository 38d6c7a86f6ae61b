//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // swarm-events = { path = "../swarm-events", features = ["test-fixtures"] }
//!
//! use swarm_events::fixtures;
//!
//! let records = fixtures::sample_records();
//! ```

use crate::{MetricsRecord, OperationKind};

/// Returns sample metric records from the fixtures file.
///
/// Contains a mix of operation, tick, path, and network records as a
/// realistic single-stream slice of simulation output.
pub fn sample_records() -> Vec<MetricsRecord> {
    let jsonl = include_str!("../tests/fixtures/sample_records.jsonl");
    jsonl
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            MetricsRecord::from_jsonl(l)
                .unwrap_or_else(|e| panic!("Failed to parse record line: {}\nError: {}", l, e))
        })
        .collect()
}

/// Returns the first operation record of the given kind from the samples.
pub fn operation_of_kind(kind: OperationKind) -> Option<MetricsRecord> {
    sample_records().into_iter().find(|r| match r {
        MetricsRecord::Operation(op) => op.op == kind,
        _ => false,
    })
}

/// Returns all network summaries from the samples.
pub fn sample_network_summaries() -> Vec<MetricsRecord> {
    sample_records()
        .into_iter()
        .filter(|r| matches!(r, MetricsRecord::Network(_)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        let records = sample_records();
        assert!(records.len() >= 6);
    }

    #[test]
    fn test_fixture_kinds_present() {
        assert!(operation_of_kind(OperationKind::Search).is_some());
        assert!(operation_of_kind(OperationKind::Delete).is_some());
        assert!(!sample_network_summaries().is_empty());
    }
}
