//! Temperature Sensing
//!
//! Re-randomizes every live drone's sensed temperature each tick. This
//! churn is what forces the partitioner and directories to rebuild from
//! scratch instead of updating incrementally.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::drone::{Alive, Temperature};
use crate::config::Config;
use crate::SimRng;

/// System to re-roll each live drone's temperature within the configured
/// range.
pub fn randomize_temperatures(
    mut rng: ResMut<SimRng>,
    config: Res<Config>,
    mut query: Query<(&Alive, &mut Temperature)>,
) {
    for (alive, mut temperature) in query.iter_mut() {
        if alive.0 {
            temperature.0 = rng.0.gen_range(config.temperature.min..config.temperature.max);
        }
    }
}
