//! Game tuning configuration
//!
//! Loaded from JSON at startup; any field left out falls back to the classic
//! defaults. Velocities are in pixels per millisecond, times in milliseconds.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Bears ===
    /// Target bear population, refilled every frame
    pub max_bears: usize,
    /// Bears never spawn closer than this to an arena edge
    pub spawn_border: f32,
    pub min_bear_speed: f32,
    pub bear_speed_range: f32,
    /// Points for shooting a bear
    pub bear_points: u64,
    /// Health lost when a bear touches the burger
    pub bear_damage: i32,
    pub bear_min_firing_delay_ms: f32,
    pub bear_firing_delay_range_ms: f32,

    // === Burger ===
    pub burger_initial_health: i32,
    pub burger_speed: f32,
    pub burger_cooldown_ms: f32,

    // === Projectiles ===
    pub french_fries_speed: f32,
    /// Spawn distance above the burger center
    pub french_fries_offset: f32,
    pub teddy_projectile_speed: f32,
    /// Spawn distance below the bear center
    pub teddy_projectile_offset: f32,
    /// Health lost when a bear projectile hits the burger
    pub teddy_projectile_damage: i32,
    /// Hard cap on live projectiles
    pub max_projectiles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,

            max_bears: 5,
            spawn_border: 100.0,
            min_bear_speed: 0.1,
            bear_speed_range: 0.2,
            bear_points: 10,
            bear_damage: 10,
            bear_min_firing_delay_ms: 500.0,
            bear_firing_delay_range_ms: 1000.0,

            burger_initial_health: 100,
            burger_speed: 0.3,
            burger_cooldown_ms: 500.0,

            french_fries_speed: 0.3,
            french_fries_offset: 45.0,
            teddy_projectile_speed: 0.2,
            teddy_projectile_offset: 20.0,
            teddy_projectile_damage: 5,
            max_projectiles: 256,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if self.arena_width <= 0.0 {
            return invalid("arena_width", "must be positive");
        }
        if self.arena_height <= 0.0 {
            return invalid("arena_height", "must be positive");
        }
        if self.spawn_border < 0.0 {
            return invalid("spawn_border", "must not be negative");
        }
        if self.spawn_border * 2.0 >= self.arena_width.min(self.arena_height) {
            return invalid("spawn_border", "leaves no room to spawn bears");
        }
        if self.min_bear_speed < 0.0 {
            return invalid("min_bear_speed", "must not be negative");
        }
        if self.bear_speed_range < 0.0 {
            return invalid("bear_speed_range", "must not be negative");
        }
        if self.bear_min_firing_delay_ms < 0.0 {
            return invalid("bear_min_firing_delay_ms", "must not be negative");
        }
        if self.bear_firing_delay_range_ms < 0.0 {
            return invalid("bear_firing_delay_range_ms", "must not be negative");
        }
        if self.bear_damage < 0 {
            return invalid("bear_damage", "must not be negative");
        }
        if self.teddy_projectile_damage < 0 {
            return invalid("teddy_projectile_damage", "must not be negative");
        }
        if self.burger_initial_health <= 0 {
            return invalid("burger_initial_health", "must be positive");
        }
        if self.max_projectiles == 0 {
            return invalid("max_projectiles", "must be positive");
        }
        Ok(())
    }
}
