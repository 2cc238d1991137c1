//! Continuous time model over the discrete tree sequence.
//!
//! [`Timeline`] maps tree indices to a time axis and back, supporting
//! anchors with a longer dwell than interpolation steps. The companion
//! types cover the scrubber viewport ([`TimelineViewport`]), the play
//! loop ([`PlaybackClock`]) and the drag protocol ([`ScrubSession`]).

mod player;
mod scrub;
mod viewport;

pub use player::PlaybackClock;
pub use scrub::{ScrubPreview, ScrubRelease, ScrubSession};
pub use viewport::TimelineViewport;

use crate::index::TransitionIndex;

/// Tolerance for snapping float progress onto segment boundaries, so
/// progress/index conversions round-trip exactly.
const BOUNDARY_EPS: f64 = 1e-9;

/// Per-tree durations with cached prefix sums.
///
/// Durations are unitless; the playback clock decides how fast the axis
/// is traversed. Interpolation steps get duration 1, anchors get the
/// dwell factor chosen at construction (1 yields the uniform model).
#[derive(Debug, Clone)]
pub struct Timeline {
    durations: Vec<f64>,
    /// Start time of each tree on the axis.
    starts: Vec<f64>,
    total: f64,
}

impl Timeline {
    /// Uniform model: every tree lasts one time unit.
    #[must_use]
    pub fn uniform(tree_count: usize) -> Self {
        Self::from_durations(vec![1.0; tree_count.max(1)])
    }

    /// Anchors dwell `anchor_dwell` times longer than steps.
    ///
    /// Negative factors are treated as 0 (anchors are skipped over on
    /// the axis but remain addressable).
    #[must_use]
    pub fn with_anchor_dwell(
        index: &TransitionIndex,
        anchor_dwell: f64,
    ) -> Self {
        let dwell = anchor_dwell.max(0.0);
        let durations = (0..index.tree_count())
            .map(|i| if index.is_anchor(i) { dwell } else { 1.0 })
            .collect();
        Self::from_durations(durations)
    }

    fn from_durations(durations: Vec<f64>) -> Self {
        let mut starts = Vec::with_capacity(durations.len());
        let mut acc = 0.0;
        for &d in &durations {
            starts.push(acc);
            acc += d;
        }
        Self {
            durations,
            starts,
            total: acc,
        }
    }

    /// Number of trees on the axis.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.durations.len()
    }

    /// Total duration of the movie on the time axis.
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        self.total
    }

    /// Progress in `[0, 1]` at which tree `i` starts.
    #[must_use]
    pub fn index_to_progress(&self, i: usize) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        let i = i.min(self.durations.len() - 1);
        self.starts[i] / self.total
    }

    /// Map a progress value to `(tree, intra-tree fraction)`.
    ///
    /// The input is clamped to `[0, 1]`; progress 1 maps to the last
    /// tree with fraction 0. Fractions within [`BOUNDARY_EPS`] of a
    /// boundary snap onto it, so
    /// `progress_to_index(index_to_progress(i)) == (i, 0.0)` holds for
    /// every `i`.
    #[must_use]
    pub fn progress_to_index(&self, progress: f64) -> (usize, f64) {
        let last = self.durations.len() - 1;
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if p >= 1.0 || self.total <= 0.0 {
            return (last, 0.0);
        }

        let tau = p * self.total;
        let mut i = self
            .starts
            .partition_point(|&start| start <= tau + BOUNDARY_EPS)
            .saturating_sub(1);

        let mut frac = if self.durations[i] > 0.0 {
            ((tau - self.starts[i]) / self.durations[i]).clamp(0.0, 1.0)
        } else {
            0.0
        };
        if frac < BOUNDARY_EPS {
            frac = 0.0;
        } else if frac > 1.0 - BOUNDARY_EPS && i < last {
            i += 1;
            frac = 0.0;
        }
        (i, frac)
    }
}
