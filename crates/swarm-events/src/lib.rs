//! Shared metric record types and serialization for the drone swarm simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod record;
pub mod snapshot;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export record types
pub use record::{
    MetricsRecord, NetworkSummary, OperationKind, OperationRecord, PathQueryRecord, TickRecord,
};

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, FlockSnapshot, PartitionSnapshot};
