//! Teddy bear spawning
//!
//! Bears appear uniformly inside the arena minus a border, heading in a
//! uniformly random direction. No attempt is made to avoid existing bears.

use glam::Vec2;
use rand::Rng;

use super::entity::TeddyBear;
use crate::settings::GameConfig;
use crate::velocity_from_polar;

/// Uniform sample from `[min, min + range)`, or `min` for an empty range
///
/// A range too small to move `min` at f32 precision counts as empty.
pub fn random_span<R: Rng + ?Sized>(rng: &mut R, min: f32, range: f32) -> f32 {
    let max = min + range;
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Spawn parameters copied out of the config
#[derive(Debug, Clone)]
pub struct Spawner {
    arena: Vec2,
    border: f32,
    min_speed: f32,
    speed_range: f32,
    min_firing_delay_ms: f32,
    firing_delay_range_ms: f32,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            arena: Vec2::new(config.arena_width, config.arena_height),
            border: config.spawn_border,
            min_speed: config.min_bear_speed,
            speed_range: config.bear_speed_range,
            min_firing_delay_ms: config.bear_min_firing_delay_ms,
            firing_delay_range_ms: config.bear_firing_delay_range_ms,
        }
    }

    /// Create a bear at a random spot with a random heading
    pub fn spawn_enemy<R: Rng + ?Sized>(&self, rng: &mut R) -> TeddyBear {
        let pos = Vec2::new(
            random_span(rng, self.border, self.arena.x - 2.0 * self.border),
            random_span(rng, self.border, self.arena.y - 2.0 * self.border),
        );

        let speed = random_span(rng, self.min_speed, self.speed_range);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let vel = velocity_from_polar(speed, angle);

        let delay = random_span(rng, self.min_firing_delay_ms, self.firing_delay_range_ms);

        log::debug!("Spawned bear at ({:.0}, {:.0}) speed {:.3}", pos.x, pos.y, speed);
        TeddyBear::new(pos, vel, delay)
    }
}
