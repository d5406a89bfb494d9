//! World state and core simulation types
//!
//! The world owns the burger, the three entity pools, the score and the RNG.
//! Presentation code reads it after each tick through [`GameState::sprites`]
//! and [`GameState::hud`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Body, Burger, Explosion, Projectile, ProjectileKind, TeddyBear};
use super::pool::{ProjectilePool, ProjectileSink};
use super::rect::Rect;
use super::spawner::Spawner;
use crate::settings::{ConfigError, GameConfig};

/// Something that happened during a tick, for audio and other observers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Burger fired french fries
    BurgerShot,
    /// A bear fired
    TeddyShot,
    /// A bear bounced off an arena wall
    TeddyWallBounce,
    /// Two bears bounced off each other (once per pair)
    TeddyCollision,
    /// Burger lost health
    BurgerDamaged { amount: i32 },
    /// Burger health reached zero (once per life)
    BurgerDied,
    /// A bear was destroyed; `shot` is false for burger contact
    BearExploded { pos: Vec2, shot: bool },
}

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Burger,
    TeddyBear,
    FrenchFries,
    TeddyBearProjectile,
    Explosion,
}

/// One drawable item in the post-tick snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub draw_rect: Rect,
    /// Animation frame (explosions only, otherwise 0)
    pub frame: u32,
}

/// Values shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub health: i32,
    pub score: u64,
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub(crate) rng: Pcg32,
    spawner: Spawner,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    pub burger: Burger,
    /// Bears in insertion order
    pub bears: Vec<TeddyBear>,
    /// Shots from both sides
    pub projectiles: ProjectilePool,
    /// Explosion effects
    pub explosions: Vec<Explosion>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a world with the default config
    pub fn new(seed: u64) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// Create a world from a custom config
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        let burger_pos = Vec2::new(
            config.arena_width / 2.0,
            config.arena_height - config.arena_height / 8.0,
        );

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawner: Spawner::new(&config),
            time_ticks: 0,
            score: 0,
            burger: Burger::new(burger_pos, config.burger_initial_health),
            bears: Vec::with_capacity(config.max_bears),
            projectiles: ProjectilePool::new(config.max_projectiles),
            explosions: Vec::new(),
            events: Vec::new(),
            config,
        };

        state.replenish_bears();
        log::info!(
            "World {}x{} ready: {} bears, seed {}",
            state.config.arena_width,
            state.config.arena_height,
            state.bears.len(),
            seed
        );
        state
    }

    /// Inject a projectile fired from outside the world
    pub fn add_projectile(&mut self, projectile: Projectile) -> bool {
        self.projectiles.add_projectile(projectile)
    }

    /// Add one randomly placed bear
    pub fn spawn_bear(&mut self) {
        let bear = self.spawner.spawn_enemy(&mut self.rng);
        self.bears.push(bear);
    }

    /// Spawn bears until the pool is back at `max_bears`; returns how many spawned
    pub fn replenish_bears(&mut self) -> usize {
        let mut spawned = 0;
        while self.bears.len() < self.config.max_bears {
            self.spawn_bear();
            spawned += 1;
        }
        spawned
    }

    pub fn health(&self) -> i32 {
        self.burger.health
    }

    pub fn is_burger_dead(&self) -> bool {
        self.burger.dead
    }

    pub fn hud(&self) -> Hud {
        Hud {
            health: self.burger.health,
            score: self.score,
        }
    }

    /// Take the events from the last tick, leaving the list empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Everything to draw, burger first, then bears, projectiles, explosions
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        let burger = std::iter::once(Sprite {
            kind: SpriteKind::Burger,
            draw_rect: self.burger.draw_rect(),
            frame: 0,
        });

        let bears = self.bears.iter().filter(|b| b.is_active()).map(|b| Sprite {
            kind: SpriteKind::TeddyBear,
            draw_rect: b.draw_rect(),
            frame: 0,
        });

        let projectiles = self.projectiles.iter().filter(|p| p.is_active()).map(|p| Sprite {
            kind: match p.kind {
                ProjectileKind::PlayerFired => SpriteKind::FrenchFries,
                ProjectileKind::EnemyFired => SpriteKind::TeddyBearProjectile,
            },
            draw_rect: p.draw_rect(),
            frame: 0,
        });

        let explosions = self.explosions.iter().filter(|e| e.is_active()).map(|e| Sprite {
            kind: SpriteKind::Explosion,
            draw_rect: e.draw_rect(),
            frame: e.frame(),
        });

        burger.chain(bears).chain(projectiles).chain(explosions)
    }
}
