//! Simulated bodies: the burger, teddy bears, projectiles and explosions
//!
//! There is no shared base struct. Each entity keeps its own fields and the
//! common capability set is the [`Body`] trait.

use glam::Vec2;
use rand::Rng;

use super::pool::ProjectileSink;
use super::rect::Rect;
use super::spawner::random_span;
use super::state::GameEvent;
use super::tick::TickInput;
use crate::consts::*;
use crate::settings::GameConfig;

/// Capabilities shared by everything in the arena
pub trait Body {
    /// Sprite center
    fn position(&self) -> Vec2;

    fn velocity(&self) -> Vec2;

    /// Visual sprite bounds
    fn draw_rect(&self) -> Rect;

    /// Hit-box used for intersection tests
    fn collision_rect(&self) -> Rect {
        self.draw_rect().inset(HITBOX_INSET)
    }

    fn is_active(&self) -> bool;

    fn deactivate(&mut self);
}

/// The player
#[derive(Debug, Clone)]
pub struct Burger {
    pub pos: Vec2,
    /// May dip below zero during a frame; clamped at frame end
    pub health: i32,
    /// Set once by the death check
    pub dead: bool,
    can_shoot: bool,
    cooldown_elapsed_ms: f32,
}

impl Burger {
    pub fn new(pos: Vec2, health: i32) -> Self {
        Self {
            pos,
            health,
            dead: false,
            can_shoot: true,
            cooldown_elapsed_ms: 0.0,
        }
    }

    /// Move from input and fire french fries when allowed
    pub fn update(
        &mut self,
        input: &TickInput,
        elapsed_ms: f32,
        config: &GameConfig,
        projectiles: &mut dyn ProjectileSink,
        events: &mut Vec<GameEvent>,
    ) {
        if self.health <= 0 {
            return;
        }

        let step = config.burger_speed * elapsed_ms;
        self.pos += input.direction() * step;

        let half = BURGER_SIZE / 2.0;
        let max = Vec2::new(config.arena_width, config.arena_height) - half;
        self.pos = self.pos.clamp(half, max.max(half));

        if input.fire && self.can_shoot {
            self.can_shoot = false;
            let spawn = self.pos - Vec2::new(0.0, config.french_fries_offset);
            let fries = Projectile::new(ProjectileKind::PlayerFired, spawn, -config.french_fries_speed);
            if projectiles.add_projectile(fries) {
                events.push(GameEvent::BurgerShot);
            }
        }

        if !self.can_shoot {
            self.cooldown_elapsed_ms += elapsed_ms;
            if self.cooldown_elapsed_ms >= config.burger_cooldown_ms || !input.fire {
                self.can_shoot = true;
                self.cooldown_elapsed_ms = 0.0;
            }
        }
    }

    /// Flag death the first time health reaches zero
    ///
    /// Returns `true` only on the call that flips the flag.
    pub fn check_death(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.health <= 0 && !self.dead {
            self.dead = true;
            events.push(GameEvent::BurgerDied);
            log::info!("Burger died");
            return true;
        }
        false
    }
}

impl Body for Burger {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn velocity(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn draw_rect(&self) -> Rect {
        Rect::from_center(self.pos, BURGER_SIZE)
    }

    /// The burger never leaves the world
    fn is_active(&self) -> bool {
        true
    }

    fn deactivate(&mut self) {}
}

/// A roaming enemy
#[derive(Debug, Clone)]
pub struct TeddyBear {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
    elapsed_shot_ms: f32,
    firing_delay_ms: f32,
}

impl TeddyBear {
    pub fn new(pos: Vec2, vel: Vec2, firing_delay_ms: f32) -> Self {
        Self {
            pos,
            vel,
            active: true,
            elapsed_shot_ms: 0.0,
            firing_delay_ms,
        }
    }

    /// Place the sprite on `rect` (as returned by a bounce)
    pub fn set_draw_rect(&mut self, rect: Rect) {
        self.pos = rect.center();
    }

    /// Move, bounce off walls and fire when the delay runs out
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        elapsed_ms: f32,
        config: &GameConfig,
        rng: &mut R,
        projectiles: &mut dyn ProjectileSink,
        events: &mut Vec<GameEvent>,
    ) {
        self.pos += self.vel * elapsed_ms;
        self.bounce_off_walls(config.arena_width, config.arena_height, events);

        self.elapsed_shot_ms += elapsed_ms;
        if self.elapsed_shot_ms >= self.firing_delay_ms {
            self.elapsed_shot_ms = 0.0;
            self.firing_delay_ms = random_span(
                rng,
                config.bear_min_firing_delay_ms,
                config.bear_firing_delay_range_ms,
            );

            let spawn = self.pos + Vec2::new(0.0, config.teddy_projectile_offset);
            // Keep shots ahead of a bear that is itself moving down
            let speed = config.teddy_projectile_speed + self.vel.y.max(0.0);
            let shot = Projectile::new(ProjectileKind::EnemyFired, spawn, speed);
            if projectiles.add_projectile(shot) {
                events.push(GameEvent::TeddyShot);
            }
        }
    }

    fn bounce_off_walls(&mut self, width: f32, height: f32, events: &mut Vec<GameEvent>) {
        let half = BEAR_SIZE / 2.0;
        let mut bounced = false;

        if self.pos.x - half.x < 0.0 {
            self.pos.x = half.x;
            self.vel.x = self.vel.x.abs();
            bounced = true;
        } else if self.pos.x + half.x > width {
            self.pos.x = width - half.x;
            self.vel.x = -self.vel.x.abs();
            bounced = true;
        }

        if self.pos.y - half.y < 0.0 {
            self.pos.y = half.y;
            self.vel.y = self.vel.y.abs();
            bounced = true;
        } else if self.pos.y + half.y > height {
            self.pos.y = height - half.y;
            self.vel.y = -self.vel.y.abs();
            bounced = true;
        }

        if bounced {
            events.push(GameEvent::TeddyWallBounce);
        }
    }
}

impl Body for TeddyBear {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn draw_rect(&self) -> Rect {
        Rect::from_center(self.pos, BEAR_SIZE)
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    /// French fries from the burger; only hurts bears
    PlayerFired,
    /// Bear projectile; only hurts the burger
    EnemyFired,
}

impl ProjectileKind {
    pub fn size(&self) -> Vec2 {
        match self {
            ProjectileKind::PlayerFired => FRENCH_FRIES_SIZE,
            ProjectileKind::EnemyFired => TEDDY_PROJECTILE_SIZE,
        }
    }
}

/// A shot travelling straight up or down
#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl Projectile {
    /// Negative `y_speed` travels up the screen
    pub fn new(kind: ProjectileKind, pos: Vec2, y_speed: f32) -> Self {
        Self {
            kind,
            pos,
            vel: Vec2::new(0.0, y_speed),
            active: true,
        }
    }

    /// Move, and retire once off the arena
    pub fn update(&mut self, elapsed_ms: f32, arena_width: f32, arena_height: f32) {
        self.pos += self.vel * elapsed_ms;
        if self.draw_rect().entirely_outside(arena_width, arena_height) {
            self.active = false;
        }
    }
}

impl Body for Projectile {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn draw_rect(&self) -> Rect {
        Rect::from_center(self.pos, self.kind.size())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Non-colliding explosion animation
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    elapsed_ms: f32,
    finished: bool,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            elapsed_ms: 0.0,
            finished: false,
        }
    }

    pub fn update(&mut self, elapsed_ms: f32) {
        if self.finished {
            return;
        }
        self.elapsed_ms += elapsed_ms;
        if self.elapsed_ms >= EXPLOSION_FRAMES as f32 * EXPLOSION_FRAME_MS {
            self.finished = true;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Index into the sprite strip
    pub fn frame(&self) -> u32 {
        ((self.elapsed_ms / EXPLOSION_FRAME_MS) as u32).min(EXPLOSION_FRAMES - 1)
    }
}

impl Body for Explosion {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn velocity(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn draw_rect(&self) -> Rect {
        Rect::from_center(self.pos, EXPLOSION_SIZE)
    }

    fn is_active(&self) -> bool {
        !self.finished
    }

    fn deactivate(&mut self) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pool::ProjectilePool;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burger_fires_then_cools_down() {
        let config = GameConfig::default();
        let mut burger = Burger::new(Vec2::new(400.0, 525.0), 100);
        let mut pool = ProjectilePool::new(16);
        let mut events = Vec::new();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        burger.update(&fire, FRAME_MS, &config, &mut pool, &mut events);
        assert_eq!(pool.len(), 1);
        assert_eq!(events, vec![GameEvent::BurgerShot]);

        // Holding fire inside the cooldown does nothing
        burger.update(&fire, FRAME_MS, &config, &mut pool, &mut events);
        assert_eq!(pool.len(), 1);

        // Releasing the button resets the cooldown early
        burger.update(&TickInput::default(), FRAME_MS, &config, &mut pool, &mut events);
        burger.update(&fire, FRAME_MS, &config, &mut pool, &mut events);
        assert_eq!(pool.len(), 2);

        let fries = pool.iter().next().unwrap();
        assert_eq!(fries.kind, ProjectileKind::PlayerFired);
        assert!(fries.vel.y < 0.0);
    }

    #[test]
    fn test_burger_stays_in_arena() {
        let config = GameConfig::default();
        let mut burger = Burger::new(Vec2::new(40.0, 300.0), 100);
        let mut pool = ProjectilePool::new(16);
        let mut events = Vec::new();
        let left = TickInput {
            left: true,
            ..Default::default()
        };

        for _ in 0..100 {
            burger.update(&left, FRAME_MS, &config, &mut pool, &mut events);
        }
        assert!(burger.draw_rect().within_bounds(config.arena_width, config.arena_height));
        assert_eq!(burger.draw_rect().left(), 0.0);
    }

    #[test]
    fn test_dead_burger_is_frozen() {
        let config = GameConfig::default();
        let mut burger = Burger::new(Vec2::new(400.0, 300.0), 0);
        let mut pool = ProjectilePool::new(16);
        let mut events = Vec::new();
        let input = TickInput {
            right: true,
            fire: true,
            ..Default::default()
        };

        burger.update(&input, FRAME_MS, &config, &mut pool, &mut events);
        assert_eq!(burger.pos, Vec2::new(400.0, 300.0));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_death_check_fires_once() {
        let mut burger = Burger::new(Vec2::new(400.0, 300.0), 0);
        let mut events = Vec::new();
        assert!(burger.check_death(&mut events));
        assert!(!burger.check_death(&mut events));
        assert!(!burger.check_death(&mut events));
        assert_eq!(events, vec![GameEvent::BurgerDied]);
    }

    #[test]
    fn test_bear_bounces_off_right_wall() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pool = ProjectilePool::new(16);
        let mut events = Vec::new();
        // Right edge at 798, one frame moves it about 3.3 px past the wall
        let mut bear = TeddyBear::new(Vec2::new(773.0, 300.0), Vec2::new(0.2, 0.0), 10_000.0);

        bear.update(FRAME_MS, &config, &mut rng, &mut pool, &mut events);
        assert!(bear.vel.x < 0.0);
        assert!((bear.velocity().x + 0.2).abs() < 1e-6);
        assert_eq!(bear.position().y, 300.0);
        assert_eq!(bear.draw_rect().right(), config.arena_width);
        assert_eq!(events, vec![GameEvent::TeddyWallBounce]);
    }

    #[test]
    fn test_bear_fires_after_delay() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut pool = ProjectilePool::new(16);
        let mut events = Vec::new();
        let mut bear = TeddyBear::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 20.0);

        bear.update(10.0, &config, &mut rng, &mut pool, &mut events);
        assert!(pool.is_empty());
        bear.update(10.0, &config, &mut rng, &mut pool, &mut events);
        assert_eq!(pool.len(), 1);
        assert_eq!(events, vec![GameEvent::TeddyShot]);

        let shot = pool.iter().next().unwrap();
        assert_eq!(shot.kind, ProjectileKind::EnemyFired);
        assert!(shot.vel.y > 0.0);
        // New delay drawn from the configured window
        assert!(bear.firing_delay_ms >= config.bear_min_firing_delay_ms);
    }

    #[test]
    fn test_projectile_retires_off_arena() {
        let mut shot = Projectile::new(ProjectileKind::PlayerFired, Vec2::new(100.0, 20.0), -0.5);
        shot.update(FRAME_MS, 800.0, 600.0);
        assert!(shot.is_active());
        for _ in 0..10 {
            shot.update(FRAME_MS, 800.0, 600.0);
        }
        assert!(!shot.is_active());
    }

    #[test]
    fn test_explosion_animation() {
        let mut boom = Explosion::new(Vec2::new(50.0, 50.0));
        assert_eq!(boom.frame(), 0);
        boom.update(25.0);
        assert_eq!(boom.frame(), 2);
        assert!(!boom.is_finished());
        boom.update(EXPLOSION_FRAMES as f32 * EXPLOSION_FRAME_MS);
        assert!(boom.is_finished());
        assert_eq!(boom.frame(), EXPLOSION_FRAMES - 1);
    }
}
