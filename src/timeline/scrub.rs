//! Drag-to-scrub protocol over the timeline.
//!
//! While a drag is active the pointer position maps to an interpolated
//! preview between two adjacent trees; the preview is rendered directly
//! and never routed through the command executor. On release the
//! position is committed only when it landed on a tree boundary; a
//! mid-segment release keeps the interpolated visual state.

use super::Timeline;

/// A release fraction at or below this counts as "on the boundary".
const COMMIT_EPS: f64 = 1e-3;

/// Interpolated preview frame requested while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubPreview {
    /// Tree the pointer sits in.
    pub from: usize,
    /// Interpolation target (`from + 1`, clamped to the last tree).
    pub to: usize,
    /// Intra-segment fraction in `[0, 1)`.
    pub frac: f64,
    /// The clamped progress that produced this preview.
    pub progress: f64,
}

/// Outcome of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubRelease {
    /// Tree the playhead ends on.
    pub index: usize,
    /// Whether the release landed on a boundary and should be committed
    /// through the command path (re-rendering a clean frame).
    pub settled: bool,
    /// Progress at release, preserved for the position indicator.
    pub progress: f64,
}

/// State machine for one scrubber drag at a time.
#[derive(Debug, Clone, Default)]
pub struct ScrubSession {
    active: bool,
    last: Option<ScrubPreview>,
}

impl ScrubSession {
    /// Fresh, inactive session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The most recent preview of the active drag, if any.
    #[must_use]
    pub fn last_preview(&self) -> Option<ScrubPreview> {
        self.last
    }

    /// Enter the dragging state.
    pub fn begin(&mut self) {
        self.active = true;
        self.last = None;
    }

    /// Map a pointer progress to an interpolation preview.
    ///
    /// Returns `None` when no drag is active (stale pointer events
    /// after release are ignored).
    pub fn update(
        &mut self,
        timeline: &Timeline,
        progress: f64,
    ) -> Option<ScrubPreview> {
        if !self.active {
            return None;
        }
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let (from, frac) = timeline.progress_to_index(progress);
        let preview = ScrubPreview {
            from,
            to: (from + 1).min(timeline.tree_count() - 1),
            frac,
            progress,
        };
        self.last = Some(preview);
        Some(preview)
    }

    /// Leave the dragging state and decide the final position.
    ///
    /// The playhead always ends on the tree the pointer sat in. The
    /// release is `settled` only when the fraction was effectively 0;
    /// otherwise the caller keeps the interpolated frame on screen and
    /// the release progress stands as the last known progress.
    pub fn end(
        &mut self,
        timeline: &Timeline,
        progress: f64,
    ) -> ScrubRelease {
        let preview = self
            .update(timeline, progress)
            .or(self.last)
            .unwrap_or(ScrubPreview {
                from: 0,
                to: 0,
                frac: 0.0,
                progress: 0.0,
            });
        self.active = false;
        self.last = None;
        ScrubRelease {
            index: preview.from,
            settled: preview.frac <= COMMIT_EPS,
            progress: preview.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> Timeline {
        Timeline::uniform(5)
    }

    #[test]
    fn updates_require_an_active_drag() {
        let mut session = ScrubSession::new();
        assert!(session.update(&timeline(), 0.5).is_none());
    }

    #[test]
    fn preview_interpolates_between_neighbors() {
        let mut session = ScrubSession::new();
        session.begin();
        let preview = session.update(&timeline(), 0.7).unwrap();
        assert_eq!(preview.from, 3);
        assert_eq!(preview.to, 4);
        assert!((preview.frac - 0.5).abs() < 1e-9);
    }

    #[test]
    fn preview_clamps_target_at_the_last_tree() {
        let mut session = ScrubSession::new();
        session.begin();
        let preview = session.update(&timeline(), 1.0).unwrap();
        assert_eq!(preview.from, 4);
        assert_eq!(preview.to, 4);
        assert_eq!(preview.frac, 0.0);
    }

    #[test]
    fn mid_segment_release_does_not_snap() {
        let mut session = ScrubSession::new();
        session.begin();
        let _ = session.update(&timeline(), 0.5);
        let release = session.end(&timeline(), 0.7);
        assert_eq!(release.index, 3);
        assert!(!release.settled);
        assert!((release.progress - 0.7).abs() < 1e-12);
        assert!(!session.is_active());
    }

    #[test]
    fn boundary_release_settles() {
        let mut session = ScrubSession::new();
        session.begin();
        let release = session.end(&timeline(), 0.6);
        assert_eq!(release.index, 3);
        assert!(release.settled);
    }

    #[test]
    fn release_without_movement_falls_back_to_origin() {
        let mut session = ScrubSession::new();
        session.begin();
        let release = session.end(&timeline(), 0.0);
        assert_eq!(release.index, 0);
        assert!(release.settled);
    }
}
