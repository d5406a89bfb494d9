//! Burger Arena headless driver
//!
//! Runs the simulation with a simple autopilot at a fixed timestep and logs
//! audio cues instead of playing them.

use std::path::PathBuf;

use clap::Parser;

use burger_arena::audio::{AudioManager, AudioSink, NullAudio, SoundCue};
use burger_arena::consts::*;
use burger_arena::sim::{Body, GameState, TickInput, tick};
use burger_arena::{ConfigError, GameConfig};

/// Headless burger vs. teddy bear session
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Number of host frames to run
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Host frame length in milliseconds
    #[arg(long, default_value_t = FRAME_MS)]
    frame_ms: f32,

    /// JSON tuning file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not log sound cues
    #[arg(long)]
    silent: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Writes each cue to the log
struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!(
            "sound {:?} vol {:.2} pan {:.1}",
            cue.effect,
            cue.volume,
            cue.pan
        );
    }
}

/// How far ahead the autopilot aims at a moving bear
const AIM_LEAD_MS: f32 = 250.0;

/// Track the horizontally nearest bear and keep firing
fn autopilot(state: &GameState) -> TickInput {
    let burger_x = state.burger.position().x;
    let target = state
        .bears
        .iter()
        .filter(|b| b.is_active())
        .map(|b| b.position().x + b.velocity().x * AIM_LEAD_MS)
        .min_by(|a, b| {
            (a - burger_x)
                .abs()
                .partial_cmp(&(b - burger_x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    if let Some(x) = target {
        // Dead zone avoids jitter once lined up
        input.left = x < burger_x - 5.0;
        input.right = x > burger_x + 5.0;
    }
    input
}

fn run<S: AudioSink>(state: &mut GameState, audio: &mut AudioManager<S>, args: &Args) {
    let mut accumulator = 0.0;

    for _ in 0..args.frames {
        accumulator += args.frame_ms.min(100.0);

        let mut substeps = 0;
        while accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
            let input = autopilot(state);
            tick(state, &input, FRAME_MS);
            audio.dispatch(&state.events);
            accumulator -= FRAME_MS;
            substeps += 1;
        }
    }
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut state = GameState::with_config(config, args.seed)?;
    log::info!("Burger Arena starting: seed {}, {} frames", args.seed, args.frames);

    if args.silent {
        run(&mut state, &mut AudioManager::new(NullAudio), &args);
    } else {
        run(&mut state, &mut AudioManager::new(LogAudio), &args);
    }

    let hud = state.hud();
    println!("{}{}", HEALTH_PREFIX, hud.health);
    println!("{}{}", SCORE_PREFIX, hud.score);
    log::info!(
        "Finished after {} ticks (burger {})",
        state.time_ticks,
        if state.is_burger_dead() { "dead" } else { "alive" }
    );
    Ok(())
}
