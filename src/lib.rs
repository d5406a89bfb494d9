//! Burger Arena - top-down arcade simulation core
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (entities, collisions, world state)
//! - `audio`: Sound cue vocabulary handed to an external playback service
//! - `settings`: Data-driven game tuning

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, SoundCue, SoundEffect};
pub use settings::{ConfigError, GameConfig};

use glam::Vec2;

/// Engine constants that are not part of the tuning config
pub mod consts {
    use glam::Vec2;

    /// Nominal frame length in milliseconds (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per driver frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Sprite sizes (draw rectangles)
    pub const BURGER_SIZE: Vec2 = Vec2::new(60.0, 60.0);
    pub const BEAR_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const FRENCH_FRIES_SIZE: Vec2 = Vec2::new(10.0, 30.0);
    pub const TEDDY_PROJECTILE_SIZE: Vec2 = Vec2::new(12.0, 12.0);
    pub const EXPLOSION_SIZE: Vec2 = Vec2::new(64.0, 64.0);

    /// Hit-boxes are inset from the sprite by this fraction on each side
    pub const HITBOX_INSET: f32 = 0.1;

    /// Explosion animation: 3x3 strip
    pub const EXPLOSION_FRAMES: u32 = 9;
    pub const EXPLOSION_FRAME_MS: f32 = 10.0;

    /// HUD label positions and prefixes
    pub const HEALTH_LOCATION: Vec2 = Vec2::new(10.0, 10.0);
    pub const SCORE_LOCATION: Vec2 = Vec2::new(10.0, 40.0);
    pub const HEALTH_PREFIX: &str = "Health: ";
    pub const SCORE_PREFIX: &str = "Score: ";
}

/// Convert a speed and heading angle to a velocity vector
#[inline]
pub fn velocity_from_polar(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}
