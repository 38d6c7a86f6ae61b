//! Flock Spawning
//!
//! Spawns the initial drone population in a disc around the origin.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::world::Vec2;
use crate::config::Config;
use crate::{api, SimRng};

/// What the initial spawn produced.
#[derive(Debug, Clone, Copy)]
pub struct SpawnSummary {
    pub total: usize,
    pub first_id: Option<u32>,
    pub last_id: Option<u32>,
}

/// Spawns the configured starting flock. The spawn disc radius scales with
/// the population so density stays roughly constant.
pub fn spawn_flock(world: &mut World) -> SpawnSummary {
    let (count, density) = {
        let config = world.resource::<Config>();
        (config.flock.starting_count, config.flock.agent_density)
    };
    let spawn_radius = count as f32 * density;

    let mut first_id = None;
    let mut last_id = None;
    for _ in 0..count {
        let position = {
            let mut rng = world.resource_mut::<SimRng>();
            random_point_in_disc(&mut rng.0, spawn_radius)
        };
        let id = api::spawn_drone(world, position);
        first_id.get_or_insert(id);
        last_id = Some(id);
    }

    SpawnSummary {
        total: count,
        first_id,
        last_id,
    }
}

/// Uniform point inside a disc of the given radius, by rejection sampling.
fn random_point_in_disc(rng: &mut SmallRng, radius: f32) -> Vec2 {
    loop {
        let x: f32 = rng.gen_range(-1.0..1.0);
        let y: f32 = rng.gen_range(-1.0..1.0);
        if x * x + y * y <= 1.0 {
            return Vec2::new(x * radius, y * radius);
        }
    }
}
