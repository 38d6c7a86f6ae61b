//! Steering & Movement
//!
//! Applies a steering velocity to every live drone each tick. The steering
//! rule itself sits behind a trait so alternative behaviors can be swapped
//! in without touching the update loop.

use bevy_ecs::prelude::*;

use crate::components::drone::{Alive, DroneId};
use crate::components::world::{Position, Vec2};
use crate::config::Config;
use crate::systems::neighbors::NeighborIndex;

/// A steering rule: position plus nearby positions in, velocity out.
pub trait SteeringBehavior: Send + Sync {
    /// Computes a raw velocity for a drone at `position` given the
    /// positions currently within its neighbor radius.
    fn steer(&self, position: Vec2, neighbors: &[Vec2]) -> Vec2;

    /// Human-readable name for display/debugging.
    fn name(&self) -> &'static str;
}

/// Cohesion toward the local center of mass plus separation away from
/// anything inside the avoidance radius.
#[derive(Debug, Clone)]
pub struct CompositeSteering {
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub avoidance_radius: f32,
}

impl CompositeSteering {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cohesion_weight: 1.0,
            separation_weight: 1.5,
            avoidance_radius: config.flock.avoidance_radius(),
        }
    }
}

impl SteeringBehavior for CompositeSteering {
    fn steer(&self, position: Vec2, neighbors: &[Vec2]) -> Vec2 {
        if neighbors.is_empty() {
            return Vec2::ZERO;
        }

        let mut center = Vec2::ZERO;
        let mut push = Vec2::ZERO;
        let avoidance_squared = self.avoidance_radius * self.avoidance_radius;

        for &neighbor in neighbors {
            center += neighbor;
            let offset = position - neighbor;
            if offset.length_squared() < avoidance_squared {
                push += offset;
            }
        }

        center = center * (1.0 / neighbors.len() as f32);
        (center - position) * self.cohesion_weight + push * self.separation_weight
    }

    fn name(&self) -> &'static str {
        "cohesion_separation"
    }
}

/// Resource holding the active steering behavior.
#[derive(Resource)]
pub struct SteeringPolicy(pub Box<dyn SteeringBehavior>);

/// System to move every live drone by its steering vector, scaled by the
/// drive factor and clamped to the configured maximum speed.
pub fn apply_steering(
    config: Res<Config>,
    policy: Res<SteeringPolicy>,
    index: Res<NeighborIndex>,
    mut query: Query<(&DroneId, &Alive, &mut Position)>,
) {
    let square_max_speed = config.flock.max_speed * config.flock.max_speed;

    for (id, alive, mut position) in query.iter_mut() {
        if !alive.0 {
            continue;
        }
        let mut velocity = policy.0.steer(position.0, index.nearby(id.0)) * config.flock.drive_factor;
        if velocity.length_squared() > square_max_speed {
            velocity = velocity.normalized_or_zero() * config.flock.max_speed;
        }
        position.0 += velocity * config.simulation.tick_seconds;
    }
}
