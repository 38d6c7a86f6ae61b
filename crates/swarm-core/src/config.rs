//! Configuration System
//!
//! Loads tuning parameters from tuning.toml for easy adjustment without
//! recompiling.

use bevy_ecs::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::comms::network::TopologyKind;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub flock: FlockConfig,
    pub temperature: TemperatureConfig,
    pub comms: CommsConfig,
    pub topology: TopologyConfig,
}

/// Simulation loop parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub default_ticks: u64,
    pub snapshot_interval: u64,
    /// Ticks between scripted probe operations in the binary; 0 disables.
    pub probe_interval: u64,
    /// Fixed timestep applied to movement each tick.
    pub tick_seconds: f32,
}

/// Flock spawning and steering parameters
#[derive(Debug, Clone, Deserialize)]
pub struct FlockConfig {
    pub starting_count: usize,
    /// Spawn disc radius is starting_count * agent_density.
    pub agent_density: f32,
    pub drive_factor: f32,
    pub max_speed: f32,
    pub neighbor_radius: f32,
    pub avoidance_radius_multiplier: f32,
}

impl FlockConfig {
    pub fn avoidance_radius(&self) -> f32 {
        self.neighbor_radius * self.avoidance_radius_multiplier
    }
}

/// Temperature sensing range (half-open, degrees)
#[derive(Debug, Clone, Deserialize)]
pub struct TemperatureConfig {
    pub min: i32,
    pub max: i32,
}

/// Directory communication parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CommsConfig {
    /// Scales geometric distance into simulated latency.
    pub time_factor: f32,
}

/// Network construction parameters
#[derive(Debug, Clone, Deserialize)]
pub struct TopologyConfig {
    pub primary: TopologyKind,
    pub secondary: TopologyKind,
    pub branching_factor: usize,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the given path, or fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path.as_ref()).unwrap_or_else(|e| {
            tracing::warn!(
                "Could not load {}: {}. Using defaults.",
                path.as_ref().display(),
                e
            );
            Self::default()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                default_ticks: 1000,
                snapshot_interval: 100,
                probe_interval: 25,
                tick_seconds: 0.02,
            },
            flock: FlockConfig {
                starting_count: 250,
                agent_density: 0.08,
                drive_factor: 10.0,
                max_speed: 5.0,
                neighbor_radius: 1.5,
                avoidance_radius_multiplier: 0.5,
            },
            temperature: TemperatureConfig { min: 0, max: 100 },
            comms: CommsConfig { time_factor: 0.1 },
            topology: TopologyConfig {
                primary: TopologyKind::Tree,
                secondary: TopologyKind::Star,
                branching_factor: 1,
            },
        }
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
