//! Directory & Topology Rebuild
//!
//! Once per tick the live membership is snapshotted in roster order,
//! partitioned by temperature, and both directories and both networks are
//! rebuilt from scratch. Shapes never survive from one tick into the next;
//! the resources are only replaced after the new structures are complete.

use bevy_ecs::prelude::*;
use std::collections::HashMap;

use crate::comms::partition::{partition, pivot_temperature};
use crate::comms::{DirectoryPair, NetworkPair};
use crate::components::drone::{Alive, DroneId, DroneRecord, Temperature};
use crate::components::roster::DroneRoster;
use crate::components::world::Position;
use crate::config::Config;

/// System to rebuild the directory pair and both networks from the current
/// live membership.
pub fn rebuild_comms(
    config: Res<Config>,
    mut roster: ResMut<DroneRoster>,
    mut directories: ResMut<DirectoryPair>,
    mut networks: ResMut<NetworkPair>,
    query: Query<(&DroneId, &Temperature, &Position, &Alive)>,
) {
    let mut live: HashMap<u32, DroneRecord> = HashMap::with_capacity(roster.len());
    for (id, temperature, position, alive) in query.iter() {
        let mut record = DroneRecord::new(id.0, temperature.0, position.0);
        record.active = alive.0;
        live.insert(id.0, record);
    }

    let snapshot = roster.snapshot(|id| live.get(&id).copied());
    let (low, high) = partition(&snapshot);

    directories.pivot = pivot_temperature(&snapshot);
    directories.rebuild(config.comms.time_factor, &low, &high);
    networks.rebuild(&config.topology, &low, &high);
}
