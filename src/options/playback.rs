//! Playback pacing options.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Play-loop pacing and timeline weighting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Milliseconds per tree at speed 1.
    pub base_step_ms: u64,
    /// Speed factor; effective interval is `base_step_ms / speed`.
    /// Clamped to at least 0.1 when applied.
    pub speed: f64,
    /// Time-axis weight of anchor trees relative to interpolation
    /// steps. 1 yields the uniform timeline.
    pub anchor_dwell: f64,
    /// Wrap to the first tree when playback reaches the end.
    pub looping: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            base_step_ms: 1000,
            speed: 1.0,
            anchor_dwell: 1.0,
            looping: false,
        }
    }
}
