//! The post-navigation update fan-out.
//!
//! After every committed position change the engine derives the facts
//! the views need (highlight set, MSA window, chart cursor, progress)
//! and pushes them out in a fixed order: renderer, chart, MSA panel,
//! scrubber. The fan-out is guarded against re-entrant requests and
//! contains facade failures without corrupting the playhead.

use super::facades::{
    ChartUpdate, MsaWindowUpdate, RenderUpdate, ScrubberUpdate,
};
use super::MovieEngine;
use crate::highlight;

impl MovieEngine {
    /// Re-publish the current state to every facade without moving.
    ///
    /// Hosts call this once after mounting their views (and after
    /// [`set_facades`](MovieEngine::set_facades)) to paint the initial
    /// frame.
    pub fn refresh(&mut self) {
        self.publish_update(false);
    }

    /// Derive view state for the current position and push it to every
    /// facade.
    ///
    /// `skip_auto_center` is set for micro-steps so the tree view keeps
    /// its camera still. A request arriving while a previous fan-out is
    /// still running is dropped with a single warning; a facade failure
    /// aborts the remaining fan-out (the playhead keeps its committed
    /// position either way).
    pub(crate) fn publish_update(&mut self, skip_auto_center: bool) {
        if self.render_in_progress {
            log::warn!("update dropped: a render is already in progress");
            return;
        }
        self.render_in_progress = true;

        let current = self.playhead.current_index;
        let slot = self.index.distance_index(current);
        let highlight = highlight::aggregate(&self.data, &self.index, current);
        let window = self.msa_model.window_for(slot);
        let cursor = if self.active_chart.is_distance_based() {
            slot
        } else {
            current
        };

        let render = RenderUpdate {
            tree: &self.data.interpolated_trees[current],
            previous_tree: self
                .playhead
                .previous_index
                .and_then(|p| self.data.interpolated_trees.get(p)),
            highlight: &highlight,
            leaf_order: &self.data.sorted_leaves,
            duration_ms: self.options.display.animation_ms,
            styles: &self.options.display,
            skip_auto_center,
        };
        if let Err(e) = self.facades.renderer.update(&render) {
            log::error!("renderer update failed: {e}");
            self.render_in_progress = false;
            return;
        }

        let chart = ChartUpdate {
            distances: &self.data.rfd_list,
            weighted_distances: &self.data.wrfd_list,
            scales: self.data.scale_list.as_deref(),
            kind: self.active_chart,
            cursor,
            sticky: self.playhead.sticky_chart_position,
        };
        if let Err(e) = self.facades.chart.update(&chart) {
            log::error!("chart update failed: {e}");
            self.render_in_progress = false;
            return;
        }

        let msa = MsaWindowUpdate {
            window,
            highlighted_taxa: &highlight,
            tree_index: current,
            transition_index: slot,
        };
        if let Err(e) = self.facades.msa.sync_window(&msa) {
            log::error!("MSA sync failed: {e}");
            self.render_in_progress = false;
            return;
        }

        let progress = self.timeline.index_to_progress(current);
        let scrubber = ScrubberUpdate {
            progress,
            total_duration: self.timeline.total_duration(),
            visible_range: self.viewport.visible_range(),
        };
        if let Err(e) = self.facades.scrubber.update(&scrubber) {
            log::error!("scrubber update failed: {e}");
            self.render_in_progress = false;
            return;
        }

        self.playhead.previous_index = Some(current);
        self.playhead.last_progress = progress;
        self.render_in_progress = false;
    }
}

#[cfg(test)]
mod tests {
    use super::super::{recording, ChartKind, MovieCommand, MovieEngine};
    use crate::movie::fixtures;
    use crate::options::Options;

    fn engine_with_log(
    ) -> (MovieEngine, std::rc::Rc<recording::Log>) {
        let (facades, log) = recording::facades();
        let engine = MovieEngine::new(
            fixtures::three_anchor_movie(),
            Options::default(),
            facades,
        )
        .unwrap();
        (engine, log)
    }

    #[test]
    fn chart_cursor_follows_the_transition_for_distance_series() {
        let (mut engine, log) = engine_with_log();
        engine.execute(MovieCommand::GoToPosition { index: 2 });
        engine.execute(MovieCommand::GoToPosition { index: 4 });

        let cursors: Vec<usize> = log
            .calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                recording::Call::Chart { cursor, .. } => Some(*cursor),
                _ => None,
            })
            .collect();
        assert_eq!(cursors, vec![0, 1]);
    }

    #[test]
    fn chart_cursor_follows_the_tree_for_the_scale_series() {
        let (mut engine, log) = engine_with_log();
        engine.set_active_chart(ChartKind::Scale);
        engine.execute(MovieCommand::GoToPosition { index: 2 });

        let cursors: Vec<usize> = log
            .calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                recording::Call::Chart { cursor, .. } => Some(*cursor),
                _ => None,
            })
            .collect();
        assert_eq!(cursors, vec![2]);
    }

    #[test]
    fn highlight_reaches_renderer_and_msa() {
        let (facades, log) = recording::facades();
        let mut engine = MovieEngine::new(
            fixtures::highlight_movie(),
            Options::default(),
            facades,
        )
        .unwrap();
        engine.execute(MovieCommand::GoToPosition { index: 3 });

        let calls = log.calls.borrow();
        assert!(calls.iter().any(|c| matches!(
            c,
            recording::Call::Render { highlight_len: 2, .. }
        )));
    }

    #[test]
    fn renderer_failure_is_contained() {
        let (mut engine, log) = engine_with_log();
        *log.fail_renderer.borrow_mut() = true;
        engine.execute(MovieCommand::Forward);

        // The position committed even though the render failed, and no
        // downstream facade was reached.
        assert_eq!(engine.current_index(), 1);
        assert!(log.calls.borrow().is_empty());
        assert_eq!(engine.previous_index(), None);

        // The guard was reset: the next command renders normally.
        *log.fail_renderer.borrow_mut() = false;
        engine.execute(MovieCommand::Forward);
        assert_eq!(engine.current_index(), 2);
        assert_eq!(log.calls.borrow().len(), 4);
        assert_eq!(engine.previous_index(), Some(2));
    }

    #[test]
    fn re_entrant_publish_is_dropped() {
        let (mut engine, log) = engine_with_log();
        engine.render_in_progress = true;
        engine.publish_update(false);
        assert!(log.calls.borrow().is_empty());
        engine.render_in_progress = false;
        engine.publish_update(false);
        assert_eq!(log.calls.borrow().len(), 4);
    }

    #[test]
    fn msa_window_follows_the_distance_slot() {
        let (mut engine, log) = engine_with_log();
        engine.execute(MovieCommand::GoToPosition { index: 1 });
        engine.execute(MovieCommand::GoToPosition { index: 4 });

        let windows: Vec<(usize, usize, usize)> = log
            .calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                recording::Call::Msa {
                    start,
                    end,
                    tree_index,
                } => Some((*start, *end, *tree_index)),
                _ => None,
            })
            .collect();
        // Slot 0 centers on column 1, slot 1 on column 2 (step 2,
        // window 4, clamped at the left edge).
        assert_eq!(windows, vec![(1, 3, 1), (1, 4, 4)]);
    }

    #[test]
    fn sticky_override_reaches_the_chart() {
        let (mut engine, log) = engine_with_log();
        engine.execute(MovieCommand::SetStickyPosition { transition: 1 });
        engine.execute(MovieCommand::GoToTransition { transition: 1 });
        engine.execute(MovieCommand::Forward);

        let stickies: Vec<Option<usize>> = log
            .calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                recording::Call::Chart { sticky, .. } => Some(*sticky),
                _ => None,
            })
            .collect();
        assert_eq!(stickies, vec![Some(1), Some(1), None]);
    }

    #[test]
    fn scrubber_progress_matches_the_committed_tree() {
        let (mut engine, log) = engine_with_log();
        engine.execute(MovieCommand::GoToPosition { index: 3 });
        let progress: Vec<f64> = log
            .calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                recording::Call::Scrubber { progress } => Some(*progress),
                _ => None,
            })
            .collect();
        assert_eq!(progress.len(), 1);
        assert!((progress[0] - 0.6).abs() < 1e-12);
        assert!((engine.last_progress() - 0.6).abs() < 1e-12);
    }
}
