//! ECS Components & Registries
//!
//! Drone components, the membership roster, and the shared coordinate types.

pub mod drone;
pub mod roster;
pub mod world;

pub use drone::{Alive, Drone, DroneId, DroneRecord, Temperature};
pub use roster::DroneRoster;
pub use world::{Position, Vec2};
