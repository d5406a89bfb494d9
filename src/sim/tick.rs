//! Fixed timestep simulation tick
//!
//! One call advances the world by one frame. Phases run in a fixed order and
//! each later phase skips anything an earlier one deactivated, so a bear can
//! only die once per frame.

use glam::Vec2;

use super::collision::{BounceOutcome, resolve_bounce};
use super::entity::{Body, Explosion, ProjectileKind, TeddyBear};
use super::state::{GameEvent, GameState};

/// Input state for a single tick (keys/buttons held down)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TickInput {
    /// Unit steps per axis; diagonals are not normalized
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        dir
    }
}

/// Advance the world by one frame of `elapsed_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) {
    state.events.clear();
    state.time_ticks += 1;

    advance(state, input, elapsed_ms);
    resolve_bear_pairs(state, elapsed_ms);
    resolve_burger_bears(state);
    resolve_burger_projectiles(state);
    resolve_bear_projectiles(state);

    state.burger.health = state.burger.health.max(0);

    cleanup(state);
    let spawned = state.replenish_bears();
    if spawned > 0 {
        log::debug!("Tick {}: spawned {} bears", state.time_ticks, spawned);
    }
}

fn advance(state: &mut GameState, input: &TickInput, elapsed_ms: f32) {
    let (width, height) = (state.config.arena_width, state.config.arena_height);

    state.burger.update(
        input,
        elapsed_ms,
        &state.config,
        &mut state.projectiles,
        &mut state.events,
    );

    for bear in state.bears.iter_mut().filter(|b| b.active) {
        bear.update(
            elapsed_ms,
            &state.config,
            &mut state.rng,
            &mut state.projectiles,
            &mut state.events,
        );
    }

    for projectile in state.projectiles.iter_mut().filter(|p| p.active) {
        projectile.update(elapsed_ms, width, height);
    }

    for explosion in &mut state.explosions {
        explosion.update(elapsed_ms);
    }
}

fn apply_bounce(bear: &mut TeddyBear, outcome: BounceOutcome) {
    match outcome {
        BounceOutcome::OutOfBounds => bear.deactivate(),
        BounceOutcome::InBounds {
            velocity,
            draw_rect,
        } => {
            bear.vel = velocity;
            bear.set_draw_rect(draw_rect);
        }
    }
}

fn resolve_bear_pairs(state: &mut GameState, elapsed_ms: f32) {
    let (width, height) = (state.config.arena_width, state.config.arena_height);
    let count = state.bears.len();

    for i in 0..count {
        for j in (i + 1)..count {
            let (a, b) = (&state.bears[i], &state.bears[j]);
            if !(a.active && b.active && a.collision_rect().intersects(&b.collision_rect())) {
                continue;
            }

            let resolution = resolve_bounce(
                elapsed_ms,
                width,
                height,
                a.velocity(),
                a.draw_rect(),
                b.velocity(),
                b.draw_rect(),
            );
            state.events.push(GameEvent::TeddyCollision);

            if let Some(resolution) = resolution {
                apply_bounce(&mut state.bears[i], resolution.first);
                apply_bounce(&mut state.bears[j], resolution.second);
            }
        }
    }
}

fn resolve_burger_bears(state: &mut GameState) {
    let hitbox = state.burger.collision_rect();
    let damage = state.config.bear_damage;

    for bear in state.bears.iter_mut() {
        if bear.active && state.burger.health > 0 && bear.collision_rect().intersects(&hitbox) {
            bear.deactivate();
            let center = bear.collision_rect().center();
            state.explosions.push(Explosion::new(center));
            state.events.push(GameEvent::BearExploded {
                pos: center,
                shot: false,
            });

            state.burger.health -= damage;
            state.events.push(GameEvent::BurgerDamaged { amount: damage });
            state.burger.check_death(&mut state.events);
        }
    }
}

fn resolve_burger_projectiles(state: &mut GameState) {
    let hitbox = state.burger.collision_rect();
    let damage = state.config.teddy_projectile_damage;

    for projectile in state.projectiles.iter_mut() {
        if projectile.kind == ProjectileKind::EnemyFired
            && projectile.active
            && state.burger.health > 0
            && projectile.collision_rect().intersects(&hitbox)
        {
            projectile.deactivate();
            state.burger.health -= damage;
            state.events.push(GameEvent::BurgerDamaged { amount: damage });
            state.burger.check_death(&mut state.events);
        }
    }
}

fn resolve_bear_projectiles(state: &mut GameState) {
    let points = state.config.bear_points;

    for bear in state.bears.iter_mut() {
        for projectile in state.projectiles.iter_mut() {
            if bear.active
                && projectile.active
                && projectile.kind == ProjectileKind::PlayerFired
                && bear.collision_rect().intersects(&projectile.collision_rect())
            {
                bear.deactivate();
                projectile.deactivate();
                let center = bear.collision_rect().center();
                state.explosions.push(Explosion::new(center));
                state.events.push(GameEvent::BearExploded {
                    pos: center,
                    shot: true,
                });
                state.score += points;
                log::debug!("Bear shot at ({:.0}, {:.0}), score {}", center.x, center.y, state.score);
            }
        }
    }
}

fn cleanup(state: &mut GameState) {
    state.bears.retain(|b| b.active);
    state.projectiles.remove_inactive();
    state.explosions.retain(|e| !e.is_finished());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::settings::GameConfig;
    use crate::sim::entity::Projectile;

    /// World with no automatic bears so tests control every body
    fn empty_world(config: GameConfig) -> GameState {
        let config = GameConfig {
            max_bears: 0,
            ..config
        };
        GameState::with_config(config, 12345).unwrap()
    }

    /// Bear that will not fire during a test
    fn still_bear(pos: Vec2, vel: Vec2) -> TeddyBear {
        TeddyBear::new(pos, vel, 1.0e9)
    }

    fn count(events: &[GameEvent], wanted: GameEvent) -> usize {
        events.iter().filter(|e| **e == wanted).count()
    }

    #[test]
    fn test_bear_pair_bounce_emits_one_event() {
        let mut state = empty_world(GameConfig::default());
        state.bears.push(still_bear(Vec2::new(100.0, 110.0), Vec2::new(0.3, 0.0)));
        state.bears.push(still_bear(Vec2::new(140.0, 110.0), Vec2::new(-0.3, 0.0)));

        tick(&mut state, &TickInput::default(), FRAME_MS);

        assert_eq!(count(&state.events, GameEvent::TeddyCollision), 1);
        assert_eq!(state.bears.len(), 2);
        assert!(state.bears[0].vel.x < 0.0);
        assert!(state.bears[1].vel.x > 0.0);
        assert!(state.bears[0].pos.x < state.bears[1].pos.x);
    }

    #[test]
    fn test_bear_pair_one_event_per_pair() {
        let mut state = empty_world(GameConfig::default());
        // Three bears in one overlapping clump: three pairs
        state.bears.push(still_bear(Vec2::new(300.0, 300.0), Vec2::ZERO));
        state.bears.push(still_bear(Vec2::new(310.0, 300.0), Vec2::ZERO));
        state.bears.push(still_bear(Vec2::new(305.0, 308.0), Vec2::ZERO));

        tick(&mut state, &TickInput::default(), FRAME_MS);

        assert_eq!(count(&state.events, GameEvent::TeddyCollision), 3);
    }

    #[test]
    fn test_bear_contact_kills_burger_once() {
        let mut state = empty_world(GameConfig {
            burger_initial_health: 10,
            bear_damage: 10,
            ..Default::default()
        });
        let burger_pos = state.burger.pos;
        state.bears.push(still_bear(burger_pos, Vec2::ZERO));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.health(), 0);
        assert!(state.is_burger_dead());
        assert_eq!(count(&state.events, GameEvent::BurgerDied), 1);
        assert_eq!(state.explosions.len(), 1);
        assert!(state.bears.is_empty());

        // More bears on top of a dead burger change nothing
        let mut deaths = 0;
        for _ in 0..5 {
            state.bears.push(still_bear(burger_pos, Vec2::ZERO));
            tick(&mut state, &TickInput::default(), FRAME_MS);
            deaths += count(&state.events, GameEvent::BurgerDied);
            assert_eq!(state.health(), 0);
        }
        assert_eq!(deaths, 0);
    }

    #[test]
    fn test_health_is_clamped_at_zero() {
        let mut state = empty_world(GameConfig {
            burger_initial_health: 5,
            bear_damage: 10,
            ..Default::default()
        });
        let burger_pos = state.burger.pos;
        state.bears.push(still_bear(burger_pos, Vec2::ZERO));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.health(), 0);
        assert_eq!(state.hud().health, 0);
    }

    #[test]
    fn test_enemy_projectile_damages_burger() {
        let mut state = empty_world(GameConfig::default());
        let burger_pos = state.burger.pos;
        state.add_projectile(Projectile::new(ProjectileKind::EnemyFired, burger_pos, 0.2));
        // Own fries never hurt the burger
        state.add_projectile(Projectile::new(ProjectileKind::PlayerFired, burger_pos, -0.3));

        tick(&mut state, &TickInput::default(), FRAME_MS);

        assert_eq!(state.health(), 95);
        assert!(state.events.contains(&GameEvent::BurgerDamaged { amount: 5 }));
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(
            state.projectiles.iter().next().unwrap().kind,
            ProjectileKind::PlayerFired
        );
    }

    #[test]
    fn test_shooting_a_bear_scores() {
        let mut state = empty_world(GameConfig::default());
        state.bears.push(still_bear(Vec2::new(400.0, 200.0), Vec2::ZERO));
        state.add_projectile(Projectile::new(
            ProjectileKind::PlayerFired,
            Vec2::new(400.0, 200.0),
            -0.3,
        ));

        tick(&mut state, &TickInput::default(), FRAME_MS);

        assert_eq!(state.score, state.config.bear_points);
        assert!(state.bears.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.explosions.len(), 1);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::BearExploded { shot: true, .. })));
    }

    #[test]
    fn test_enemy_projectile_does_not_hit_bears() {
        let mut state = empty_world(GameConfig::default());
        state.bears.push(still_bear(Vec2::new(400.0, 200.0), Vec2::ZERO));
        state.add_projectile(Projectile::new(
            ProjectileKind::EnemyFired,
            Vec2::new(400.0, 200.0),
            0.2,
        ));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.score, 0);
        assert_eq!(state.bears.len(), 1);
    }

    #[test]
    fn test_contact_kill_wins_over_projectile() {
        let mut state = empty_world(GameConfig::default());
        let burger_pos = state.burger.pos;
        state.bears.push(still_bear(burger_pos, Vec2::ZERO));
        state.add_projectile(Projectile::new(ProjectileKind::PlayerFired, burger_pos, -0.3));

        tick(&mut state, &TickInput::default(), FRAME_MS);

        // Bear died to the burger, so no points and the fries fly on
        assert_eq!(state.score, 0);
        assert_eq!(state.health(), 90);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_population_refilled_every_tick() {
        let mut state = GameState::new(777);
        let max = state.config.max_bears;
        state.bears[0].active = false;
        state.bears[2].active = false;

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.bears.len(), max);
        assert!(state.bears.iter().all(|b| b.active));

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &fire, FRAME_MS);
            assert_eq!(state.bears.len(), max);
        }
    }

    #[test]
    fn test_score_monotonic_and_per_kill() {
        let mut state = GameState::new(2024);
        let points = state.config.bear_points;
        let mut last_score = 0;
        let mut kills = 0;

        for frame in 0..2000 {
            let input = TickInput {
                fire: true,
                left: (frame / 120) % 2 == 0,
                right: (frame / 120) % 2 == 1,
                ..Default::default()
            };
            tick(&mut state, &input, FRAME_MS);

            let shot_kills = state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::BearExploded { shot: true, .. }))
                .count() as u64;
            kills += shot_kills;

            assert!(state.score >= last_score);
            assert_eq!(state.score - last_score, shot_kills * points);
            last_score = state.score;
        }
        assert_eq!(state.score, kills * points);
    }

    #[test]
    fn test_finished_explosions_removed() {
        let mut state = empty_world(GameConfig::default());
        state.explosions.push(Explosion::new(Vec2::new(50.0, 50.0)));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.explosions.len(), 1);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for frame in 0..400 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input, FRAME_MS);
            tick(&mut state2, input, FRAME_MS);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.health(), state2.health());
        assert_eq!(state1.bears.len(), state2.bears.len());
        for (a, b) in state1.bears.iter().zip(&state2.bears) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.vel, b.vel);
        }
        assert_eq!(state1.projectiles.len(), state2.projectiles.len());
    }
}
