//! Snapshot Generation
//!
//! System support for generating flock snapshots at regular intervals.

use bevy_ecs::prelude::*;
use std::fs;
use std::path::Path;

use swarm_events::FlockSnapshot;

use crate::comms::{DirectoryPair, NetworkPair};
use crate::components::roster::DroneRoster;
use crate::SimulationState;

/// Resource to track snapshot generation
#[derive(Resource)]
pub struct SnapshotGenerator {
    snapshot_interval: u64,
    last_snapshot_tick: u64,
    generated: u64,
}

impl SnapshotGenerator {
    pub fn new(snapshot_interval: u64) -> Self {
        Self {
            snapshot_interval,
            last_snapshot_tick: 0,
            generated: 0,
        }
    }

    pub fn should_snapshot(&self, current_tick: u64) -> bool {
        self.snapshot_interval > 0 && current_tick > 0 && current_tick % self.snapshot_interval == 0
    }

    pub fn mark_snapshot(&mut self, tick: u64) {
        self.last_snapshot_tick = tick;
    }

    pub fn snapshot_count(&self) -> u64 {
        self.generated
    }

    fn note_generated(&mut self) {
        self.generated += 1;
    }
}

/// Generate a flock snapshot from the current directory and network state
pub fn generate_snapshot(world: &mut World, triggered_by: &str) -> FlockSnapshot {
    let tick = world
        .get_resource::<SimulationState>()
        .map(|state| state.current_tick)
        .unwrap_or(0);

    let mut snapshot = FlockSnapshot::new(tick, triggered_by);
    snapshot.live_count = world.resource::<DroneRoster>().len();

    let directories = world.resource::<DirectoryPair>();
    snapshot.partition.low_count = directories.low.len();
    snapshot.partition.high_count = directories.high.len();
    snapshot.partition.pivot_temperature = directories.pivot;

    let networks = world.resource::<NetworkPair>();
    snapshot.networks.push(networks.primary.summary("primary", None));
    snapshot.networks.push(networks.secondary.summary("secondary", None));

    world.resource_mut::<SnapshotGenerator>().note_generated();
    snapshot
}

/// Write a snapshot into the snapshots directory
pub fn write_snapshot_to_dir(snapshot: &FlockSnapshot) -> std::io::Result<()> {
    let dir = Path::new("output/snapshots");
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("snapshot_tick_{:06}.json", snapshot.tick));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)
}

/// Write a snapshot as the current state file
pub fn write_current_state(snapshot: &FlockSnapshot) -> std::io::Result<()> {
    fs::create_dir_all("output")?;
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write("output/current_state.json", json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_should_snapshot_interval() {
        let generator = SnapshotGenerator::new(100);
        assert!(!generator.should_snapshot(0));
        assert!(!generator.should_snapshot(99));
        assert!(generator.should_snapshot(100));
        assert!(generator.should_snapshot(300));

        let disabled = SnapshotGenerator::new(0);
        assert!(!disabled.should_snapshot(100));
    }

    #[test]
    fn test_generate_snapshot_counts() {
        let mut world = World::new();
        let config = Config::default();
        world.insert_resource(SimulationState {
            current_tick: 7,
            max_ticks: 100,
            snapshot_interval: 10,
        });
        world.insert_resource(DroneRoster::new());
        world.insert_resource(DirectoryPair::new(config.comms.time_factor));
        world.insert_resource(NetworkPair::default());
        world.insert_resource(SnapshotGenerator::new(10));

        let snapshot = generate_snapshot(&mut world, "test");
        assert_eq!(snapshot.tick, 7);
        assert_eq!(snapshot.live_count, 0);
        assert_eq!(snapshot.networks.len(), 2);
        assert_eq!(world.resource::<SnapshotGenerator>().snapshot_count(), 1);
    }
}
