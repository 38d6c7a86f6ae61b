//! Metric Record Types
//!
//! All record type definitions matching the simulation metrics output schema.
//! Records are emitted by the simulation as JSONL lines; format and storage
//! beyond that are the sink's concern.

use serde::{Deserialize, Serialize};

/// Directory operation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Search,
    Delete,
    PredicateSearch,
}

impl OperationKind {
    /// Returns all operation kind variants.
    pub fn all() -> &'static [OperationKind] {
        &[
            OperationKind::Search,
            OperationKind::Delete,
            OperationKind::PredicateSearch,
        ]
    }
}

/// One directory operation with its accumulated simulated latency.
///
/// `step_cost` is the cost of the last hop taken, `total_cost` the sum over
/// the whole traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub op: OperationKind,
    /// Target drone id; absent for predicate searches.
    pub drone_id: Option<u32>,
    pub step_cost: f32,
    pub total_cost: f32,
    pub found: bool,
    pub tick: u64,
}

/// Per-tick timing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    pub tick: u64,
    /// Wall-clock milliseconds since the unix epoch at tick end.
    pub timestamp_ms: u64,
    pub frame_rate: f32,
}

/// One shortest-path query with its measured wall-clock latency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathQueryRecord {
    pub start_id: u32,
    pub target_id: u32,
    pub elapsed_ms: f32,
    pub found: bool,
    pub tick: u64,
}

/// Shape summary for one network topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub network: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f32,
    /// Measured BFS latency, when a probe ran against this network.
    pub bfs_latency_ms: Option<f32>,
}

/// Tagged union of every record the simulation emits.
///
/// Serializes with a `record` discriminator so a single JSONL stream can
/// carry all record kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum MetricsRecord {
    Operation(OperationRecord),
    Tick(TickRecord),
    Path(PathQueryRecord),
    Network(NetworkSummary),
}

impl MetricsRecord {
    /// Serializes this record to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a record from a JSONL line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&OperationKind::Search).unwrap(),
            r#""search""#
        );
        assert_eq!(
            serde_json::to_string(&OperationKind::PredicateSearch).unwrap(),
            r#""predicate_search""#
        );
    }

    #[test]
    fn test_operation_record_roundtrip() {
        let record = MetricsRecord::Operation(OperationRecord {
            op: OperationKind::Delete,
            drone_id: Some(17),
            step_cost: 0.5,
            total_cost: 1.25,
            found: true,
            tick: 42,
        });

        let line = record.to_jsonl().unwrap();
        let parsed = MetricsRecord::from_jsonl(&line).unwrap();
        assert_eq!(record, parsed);
    }

    #[test]
    fn test_record_discriminator() {
        let record = MetricsRecord::Tick(TickRecord {
            tick: 7,
            timestamp_ms: 1_700_000_000_000,
            frame_rate: 60.0,
        });

        let line = record.to_jsonl().unwrap();
        assert!(line.contains(r#""record":"tick""#));
    }

    #[test]
    fn test_network_summary_roundtrip() {
        let record = MetricsRecord::Network(NetworkSummary {
            network: "primary".to_string(),
            node_count: 4,
            edge_count: 3,
            average_degree: 1.5,
            bfs_latency_ms: Some(0.02),
        });

        let line = record.to_jsonl().unwrap();
        let parsed = MetricsRecord::from_jsonl(&line).unwrap();
        assert_eq!(record, parsed);
    }

    #[test]
    fn test_predicate_search_has_no_drone_id() {
        let record = MetricsRecord::Operation(OperationRecord {
            op: OperationKind::PredicateSearch,
            drone_id: None,
            step_cost: 0.0,
            total_cost: 0.3,
            found: false,
            tick: 1,
        });

        let line = record.to_jsonl().unwrap();
        let parsed = MetricsRecord::from_jsonl(&line).unwrap();
        match parsed {
            MetricsRecord::Operation(op) => assert!(op.drone_id.is_none()),
            other => panic!("Unexpected record: {:?}", other),
        }
    }
}
