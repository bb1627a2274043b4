//! Simulated sample playback: a progress value driven by a repeating tick.

use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;
pub const DEFAULT_PROGRESS_STEP: f32 = 1.5;
pub const PROGRESS_MAX: f32 = 100.0;
/// Smallest accepted per-tick step; a full run takes at most about 10 000 ticks.
pub const MIN_PROGRESS_STEP: f32 = 0.01;

/// Tick cadence and per-tick progress increment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    pub tick_interval: Duration,
    pub step: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            step: DEFAULT_PROGRESS_STEP,
        }
    }
}

impl PlaybackSettings {
    /// Ticks needed to go from 0 to 100.
    pub fn ticks_to_finish(&self) -> u32 {
        (PROGRESS_MAX / self.step).ceil() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Playback {
    pub is_playing: bool,
    pub progress: f32,
}

impl Playback {
    /// Start from zero when stopped, pause in place when playing.
    ///
    /// A paused progress value stays visible until the next start resets it.
    pub fn toggle(&mut self) {
        if self.is_playing {
            self.is_playing = false;
        } else {
            self.is_playing = true;
            self.progress = 0.0;
        }
    }

    /// Advance by `step`; clamps at 100 and stops. Returns false when not playing.
    ///
    /// A step too small to move `progress` finishes playback instead of
    /// leaving it stuck below 100.
    pub fn tick(&mut self, step: f32) -> bool {
        if !self.is_playing {
            return false;
        }
        let next = self.progress + step;
        self.progress = if next > self.progress { next } else { PROGRESS_MAX };
        if self.progress >= PROGRESS_MAX {
            self.progress = PROGRESS_MAX;
            self.is_playing = false;
        }
        true
    }

    pub fn reset(&mut self) {
        self.is_playing = false;
        self.progress = 0.0;
    }

    pub fn fraction(&self) -> f32 {
        (self.progress / PROGRESS_MAX).clamp(0.0, 1.0)
    }
}

/// Cancellable repeating task that schedules playback ticks.
///
/// Holds no thread or callback; the owner asks it which ticks are due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTimer {
    generation: u64,
    interval: Duration,
    next_due: Duration,
}

impl TickTimer {
    pub fn start(generation: u64, interval: Duration, now: Duration) -> Self {
        Self {
            generation,
            interval,
            next_due: now + interval,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// Consume one due tick, if any, and schedule the following one.
    pub fn fire(&mut self, now: Duration) -> bool {
        if self.next_due > now {
            return false;
        }
        self.next_due += self.interval;
        true
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        self.next_due.saturating_sub(now)
    }
}
