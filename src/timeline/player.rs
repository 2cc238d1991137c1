//! Wall-clock pacing for movie playback.

use web_time::{Duration, Instant};

/// Minimum playback speed factor; lower requests are clamped.
const MIN_SPEED: f64 = 0.1;

/// Accumulator-driven play loop clock.
///
/// The host calls [`tick`](Self::tick) once per frame; the clock
/// converts elapsed wall-clock time into a number of discrete advance
/// events, one per `base / speed` interval. Pausing stops ticks
/// immediately; resuming resets the accumulator so no catch-up burst
/// occurs.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    base: Duration,
    speed: f64,
    step: Duration,
    playing: bool,
    looping: bool,
    last_tick: Option<Instant>,
    accumulator: Duration,
}

impl PlaybackClock {
    /// Clock advancing once per `base` at speed 1.
    #[must_use]
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            speed: 1.0,
            step: base,
            playing: false,
            looping: false,
            last_tick: None,
            accumulator: Duration::ZERO,
        }
    }

    /// Set the speed factor (clamped to at least `0.1`).
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(MIN_SPEED);
        self.step = self.base.div_f64(self.speed);
    }

    /// Current speed factor.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Whether the clock is currently producing advance events.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Enable or disable wrap-around at the end of the movie.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Whether playback wraps around at the end of the movie.
    #[must_use]
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Start producing advance events.
    pub fn resume(&mut self, now: Instant) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.last_tick = Some(now);
        self.accumulator = Duration::ZERO;
    }

    /// Stop producing advance events immediately.
    pub fn pause(&mut self) {
        self.playing = false;
        self.last_tick = None;
        self.accumulator = Duration::ZERO;
    }

    /// Toggle between playing and paused states.
    pub fn toggle(&mut self, now: Instant) {
        if self.playing {
            self.pause();
        } else {
            self.resume(now);
        }
    }

    /// Advance the clock and return how many steps elapsed since the
    /// previous tick.
    pub fn tick(&mut self, now: Instant) -> usize {
        if !self.playing {
            return 0;
        }
        let Some(last) = self.last_tick.replace(now) else {
            return 0;
        };
        self.accumulator += now.saturating_duration_since(last);

        if self.step.is_zero() {
            return 0;
        }
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }
}
