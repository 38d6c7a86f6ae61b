//! Drone Swarm Directory & Topology Engine Library
//!
//! Public API for the simulation: the live membership roster, the
//! per-partition directory indexes, the communication network topologies,
//! and the tick systems that rebuild them.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod api;
pub mod comms;
pub mod components;
pub mod config;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::Config;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

/// Global simulation state resource
#[derive(Resource)]
pub struct SimulationState {
    pub current_tick: u64,
    pub max_ticks: u64,
    pub snapshot_interval: u64,
}
