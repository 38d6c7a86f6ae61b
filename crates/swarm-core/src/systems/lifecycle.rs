//! Drone Lifecycle
//!
//! Queued self-destruct handling. A deactivated drone is unlinked from the
//! roster and hidden from the current directory and networks immediately;
//! the next rebuild forgets it entirely.

use bevy_ecs::prelude::*;
use tracing::info;

use crate::comms::{DirectoryPair, NetworkPair};
use crate::components::drone::{Alive, DroneId};
use crate::components::roster::DroneRoster;

/// Resource: pending self-destruct requests, drained once per tick.
#[derive(Resource, Debug, Default)]
pub struct SelfDestructQueue {
    requests: Vec<u32>,
}

impl SelfDestructQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: u32) {
        self.requests.push(id);
    }

    pub fn drain(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.requests)
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }
}

/// System to apply queued self-destructs.
pub fn process_self_destructs(
    mut queue: ResMut<SelfDestructQueue>,
    mut roster: ResMut<DroneRoster>,
    mut directories: ResMut<DirectoryPair>,
    mut networks: ResMut<NetworkPair>,
    mut query: Query<(&DroneId, &mut Alive)>,
) {
    if queue.is_empty() {
        return;
    }

    for id in queue.drain() {
        let mut known = false;
        for (drone_id, mut alive) in query.iter_mut() {
            if drone_id.0 == id && alive.0 {
                alive.0 = false;
                known = true;
            }
        }
        if !known {
            // Stale or repeated request: a no-op, not an error.
            info!(id, "self-destruct requested for unknown drone");
            continue;
        }

        roster.remove(id);
        directories.mark_inactive(id);
        networks.remove_node(id);
        info!(id, "drone self-destructed");
    }
}
