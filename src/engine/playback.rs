//! Play-loop and scrubbing integration.
//!
//! The host drives [`MovieEngine::tick`] from its frame callback;
//! elapsed wall-clock time is converted into `Forward` commands by the
//! playback clock. Scrub previews bypass the command path entirely and
//! only a settled release is committed through it.

use web_time::Instant;

use super::facades::{InterpolationFrame, ScrubberUpdate};
use super::{MovieCommand, MovieEngine};

impl MovieEngine {
    /// Toggle between playing and paused.
    pub fn toggle_playback(&mut self, now: Instant) {
        self.clock.toggle(now);
        log::debug!(
            "playback {}",
            if self.clock.is_playing() {
                "resumed"
            } else {
                "paused"
            }
        );
    }

    /// Stop playback immediately.
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Change the playback speed factor (clamped to at least 0.1).
    pub fn set_speed(&mut self, speed: f64) {
        self.clock.set_speed(speed);
    }

    /// Enable or disable wrap-around at the end of the movie.
    pub fn set_looping(&mut self, looping: bool) {
        self.clock.set_looping(looping);
    }

    /// Advance playback by the wall-clock time elapsed since the last
    /// tick, emitting one `Forward` per playback step.
    ///
    /// At the end of the movie playback either wraps to the start
    /// (when looping) or pauses.
    pub fn tick(&mut self, now: Instant) {
        let steps = self.clock.tick(now);
        for _ in 0..steps {
            let last = self.index.tree_count() - 1;
            if self.playhead.current_index >= last {
                if self.clock.looping() {
                    self.execute(MovieCommand::GoToPosition { index: 0 });
                } else {
                    self.clock.pause();
                    log::debug!("playback reached the end of the movie");
                    break;
                }
            } else {
                self.execute(MovieCommand::Forward);
            }
        }
    }

    // ── Scrubbing ───────────────────────────────────────────────────

    /// Enter the scrubbing state (pointer down on the scrubber).
    pub fn begin_scrub(&mut self) {
        self.scrub.begin();
    }

    /// Preview the position under the pointer (pointer move).
    ///
    /// Renders an interpolated frame between the two trees surrounding
    /// the pointer and moves the position indicator; the logical
    /// current index is not committed.
    pub fn scrub_to(&mut self, progress: f64) {
        let Some(preview) = self.scrub.update(&self.timeline, progress)
        else {
            return;
        };
        self.playhead.last_progress = preview.progress;

        let frame = InterpolationFrame {
            from_tree: &self.data.interpolated_trees[preview.from],
            to_tree: &self.data.interpolated_trees[preview.to],
            frac: preview.frac,
        };
        if let Err(e) = self.facades.renderer.render_interpolated_frame(&frame)
        {
            log::error!("interpolated frame failed: {e}");
        }

        let update = ScrubberUpdate {
            progress: preview.progress,
            total_duration: self.timeline.total_duration(),
            visible_range: self.viewport.visible_range(),
        };
        if let Err(e) = self.facades.scrubber.update(&update) {
            log::error!("scrubber update failed: {e}");
        }
    }

    /// Release the drag (pointer up).
    ///
    /// A release on a tree boundary is committed through the command
    /// path, re-rendering a clean frame. A mid-segment release keeps
    /// the interpolated frame on screen: the current index becomes the
    /// tree the pointer sat in and the release progress stands.
    pub fn end_scrub(&mut self, progress: f64) {
        if !self.scrub.is_active() {
            return;
        }
        let release = self.scrub.end(&self.timeline, progress);
        if release.settled {
            self.execute(MovieCommand::HandleDrag {
                index: release.index,
            });
        } else {
            self.playhead.current_index = release.index;
            self.playhead.last_progress = release.progress;
            log::debug!(
                "scrub released mid-segment at progress {:.4}",
                release.progress
            );
        }
    }

    // ── Timeline viewport ───────────────────────────────────────────

    /// Zoom the scrubber viewport in around its center.
    pub fn zoom_timeline_in(&mut self, factor: f64) {
        self.viewport.zoom_in(factor);
        self.push_scrubber_state();
    }

    /// Zoom the scrubber viewport out around its center.
    pub fn zoom_timeline_out(&mut self, factor: f64) {
        self.viewport.zoom_out(factor);
        self.push_scrubber_state();
    }

    /// Reset the scrubber viewport to the whole movie.
    pub fn fit_timeline(&mut self) {
        self.viewport.fit_to_window();
        self.push_scrubber_state();
    }

    /// Center the scrubber viewport on a time-axis position.
    pub fn move_timeline_to(&mut self, tau: f64) {
        self.viewport.move_to(tau);
        self.push_scrubber_state();
    }

    /// Push the current progress and viewport to the scrubber widget.
    fn push_scrubber_state(&mut self) {
        let update = ScrubberUpdate {
            progress: self.playhead.last_progress,
            total_duration: self.timeline.total_duration(),
            visible_range: self.viewport.visible_range(),
        };
        if let Err(e) = self.facades.scrubber.update(&update) {
            log::error!("scrubber update failed: {e}");
        }
    }
}
