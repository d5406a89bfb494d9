//! Audio cue routing
//!
//! The simulation only records that something audible happened. This module
//! turns those [`GameEvent`]s into [`SoundCue`]s and hands them, fire and
//! forget, to whatever [`AudioSink`] the host provides.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Burger takes damage
    BurgerDamage,
    /// Burger health reaches zero
    BurgerDeath,
    /// Burger fires french fries
    BurgerShot,
    /// A bear blows up
    Explosion,
    /// Bear hits a wall or another bear
    TeddyBounce,
    /// Bear fires
    TeddyShot,
}

/// A request to play one effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub effect: SoundEffect,
    /// 0.0 - 1.0
    pub volume: f32,
    /// -1.0 (left) - 1.0 (right)
    pub pan: f32,
}

impl SoundCue {
    pub fn new(effect: SoundEffect, volume: f32, pan: f32) -> Self {
        Self {
            effect,
            volume,
            pan,
        }
    }
}

/// Cue for a simulation event
pub fn cue_for(event: &GameEvent) -> SoundCue {
    match event {
        GameEvent::BurgerShot => SoundCue::new(SoundEffect::BurgerShot, 0.5, 0.0),
        GameEvent::TeddyShot => SoundCue::new(SoundEffect::TeddyShot, 0.5, 0.0),
        GameEvent::TeddyWallBounce | GameEvent::TeddyCollision => {
            SoundCue::new(SoundEffect::TeddyBounce, 0.1, 0.0)
        }
        GameEvent::BurgerDamaged { .. } => SoundCue::new(SoundEffect::BurgerDamage, 0.1, 0.0),
        GameEvent::BurgerDied => SoundCue::new(SoundEffect::BurgerDeath, 0.5, -0.5),
        GameEvent::BearExploded { .. } => SoundCue::new(SoundEffect::Explosion, 0.5, -0.5),
    }
}

/// External playback service
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Keeps every cue, for tests and replays
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub cues: Vec<SoundCue>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

/// Volume mixing in front of a sink
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Scale a cue by the mixer volume and pass it on
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume() * cue.volume;
        if vol <= 0.0 {
            return;
        }
        self.sink.play(SoundCue { volume: vol, ..cue });
    }

    /// Play the cues for one tick's events, in order
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for cue in events.iter().map(cue_for) {
            self.play(cue);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
