//! Drone Components
//!
//! Components for individual drones: identity, sensed temperature, liveness.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::world::Vec2;

/// Marker component identifying an entity as a drone
#[derive(Component, Debug, Clone, Default)]
pub struct Drone;

/// Unique identifier for a drone, assigned once at spawn and never reused
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DroneId(pub u32);

/// Sensed temperature, re-randomized every tick by the sensing system
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Temperature(pub i32);

/// Whether the drone is alive
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alive(pub bool);

impl Alive {
    pub fn new() -> Self {
        Self(true)
    }

    pub fn is_alive(&self) -> bool {
        self.0
    }
}

/// Plain-copy view of a drone taken at rebuild time.
///
/// The directory and network structures hold these snapshots instead of
/// entity references; they read identity, temperature, position, and
/// liveness, and never write any of them back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneRecord {
    pub id: u32,
    pub temperature: i32,
    pub position: Vec2,
    pub active: bool,
}

impl DroneRecord {
    pub fn new(id: u32, temperature: i32, position: Vec2) -> Self {
        Self {
            id,
            temperature,
            position,
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_starts_active() {
        let record = DroneRecord::new(3, 42, Vec2::new(1.0, 2.0));
        assert!(record.active);
        assert_eq!(record.id, 3);
        assert_eq!(record.temperature, 42);
    }

    #[test]
    fn test_alive_default_is_dead() {
        assert!(!Alive::default().is_alive());
        assert!(Alive::new().is_alive());
    }
}
