//! ECS Systems
//!
//! All simulation systems: lifecycle, sensing, neighbor indexing, steering,
//! and the per-tick directory/topology rebuild.

use bevy_ecs::prelude::*;

pub mod lifecycle;
pub mod movement;
pub mod neighbors;
pub mod rebuild;
pub mod sensing;

// Re-export commonly used systems and resources
pub use lifecycle::{process_self_destructs, SelfDestructQueue};
pub use movement::{apply_steering, CompositeSteering, SteeringBehavior, SteeringPolicy};
pub use neighbors::{build_neighbor_index, NeighborIndex};
pub use rebuild::rebuild_comms;
pub use sensing::randomize_temperatures;

/// Builds the per-tick schedule in canonical order: lifecycle, sensing,
/// neighbor indexing, steering, then the directory/topology rebuild. No
/// query is answered against a tick's state until the rebuild completes.
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            process_self_destructs,
            randomize_temperatures,
            build_neighbor_index,
            apply_steering,
            rebuild_comms,
        )
            .chain(),
    );
    schedule
}
