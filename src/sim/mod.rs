//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Pools are only pruned in the cleanup phase, never mid-iteration
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod pool;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{BounceOutcome, CollisionResolution, resolve_bounce};
pub use entity::{Body, Burger, Explosion, Projectile, ProjectileKind, TeddyBear};
pub use pool::{ProjectilePool, ProjectileSink};
pub use rect::Rect;
pub use spawner::Spawner;
pub use state::{GameEvent, GameState, Hud, Sprite, SpriteKind};
pub use tick::{TickInput, tick};
