//! Flock Snapshot Types
//!
//! Periodic summaries of the whole flock: membership count, partition split,
//! and the shape of both communication networks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::NetworkSummary;

/// Generates a unique snapshot identifier.
pub fn generate_snapshot_id() -> String {
    format!("snap_{}", Uuid::new_v4().simple())
}

/// Size and pivot of one attribute partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionSnapshot {
    pub low_count: usize,
    pub high_count: usize,
    /// Temperature threshold used for the split; absent when the flock was
    /// empty at snapshot time.
    pub pivot_temperature: Option<i32>,
}

/// A point-in-time summary of the simulation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlockSnapshot {
    pub snapshot_id: String,
    pub tick: u64,
    pub triggered_by: String,
    pub live_count: usize,
    pub partition: PartitionSnapshot,
    pub networks: Vec<NetworkSummary>,
}

impl FlockSnapshot {
    /// Creates an empty snapshot shell for the given tick.
    pub fn new(tick: u64, triggered_by: impl Into<String>) -> Self {
        Self {
            snapshot_id: generate_snapshot_id(),
            tick,
            triggered_by: triggered_by.into(),
            live_count: 0,
            partition: PartitionSnapshot {
                low_count: 0,
                high_count: 0,
                pivot_temperature: None,
            },
            networks: Vec::new(),
        }
    }
}
