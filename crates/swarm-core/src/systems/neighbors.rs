//! Neighbor Index
//!
//! Per-tick rebuilt index of nearby drone positions. The index is the
//! opaque "who is around me" provider the steering behavior consumes;
//! the brute-force scan here can be swapped for a smarter structure
//! without touching the movement loop.

use bevy_ecs::prelude::*;
use std::collections::HashMap;

use crate::components::drone::{Alive, DroneId};
use crate::components::world::{Position, Vec2};
use crate::config::Config;

/// Resource mapping each live drone to the positions within its neighbor
/// radius, rebuilt before movement every tick.
#[derive(Resource, Debug, Default)]
pub struct NeighborIndex {
    neighbors: HashMap<u32, Vec<Vec2>>,
}

impl NeighborIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all neighbor data (called before rebuilding)
    pub fn clear(&mut self) {
        self.neighbors.clear();
    }

    pub fn set(&mut self, id: u32, positions: Vec<Vec2>) {
        self.neighbors.insert(id, positions);
    }

    /// Nearby positions for a drone; empty for unknown ids.
    pub fn nearby(&self, id: u32) -> &[Vec2] {
        self.neighbors.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn count(&self, id: u32) -> usize {
        self.neighbors.get(&id).map(|v| v.len()).unwrap_or(0)
    }
}

/// System to build the NeighborIndex with a brute-force radius scan.
/// This runs before steering so movement reads cached data.
pub fn build_neighbor_index(
    mut index: ResMut<NeighborIndex>,
    config: Res<Config>,
    query: Query<(&DroneId, &Position, &Alive)>,
) {
    index.clear();

    let radius_squared = config.flock.neighbor_radius * config.flock.neighbor_radius;
    let drones: Vec<(u32, Vec2, bool)> = query
        .iter()
        .map(|(id, position, alive)| (id.0, position.0, alive.0))
        .collect();

    for &(id, position, alive) in &drones {
        if !alive {
            continue;
        }
        let nearby: Vec<Vec2> = drones
            .iter()
            .filter(|&&(other_id, other_position, other_alive)| {
                other_alive
                    && other_id != id
                    && (other_position - position).length_squared() <= radius_squared
            })
            .map(|&(_, other_position, _)| other_position)
            .collect();
        index.set(id, nearby);
    }
}
