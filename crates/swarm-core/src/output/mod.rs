//! Output
//!
//! The JSONL metrics sink and periodic flock snapshot generation.

pub mod sink;
pub mod snapshot;

pub use sink::{MetricsSink, SinkError};
pub use snapshot::{
    generate_snapshot, write_current_state, write_snapshot_to_dir, SnapshotGenerator,
};
