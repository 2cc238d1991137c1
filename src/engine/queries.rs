//! Read-only accessors over the engine's state.

use serde_json::Value;

use super::MovieEngine;
use crate::highlight::{self, TaxonGroup};
use crate::index::TransitionIndex;
use crate::movie::{self, MovieData, ValidationReport};
use crate::msa::MsaWindow;
use crate::timeline::{Timeline, TimelineViewport};

impl MovieEngine {
    /// Current position in the flat tree sequence.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.playhead.current_index
    }

    /// Position rendered before the current one, if any.
    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        self.playhead.previous_index
    }

    /// Most recent user-pinned chart position.
    #[must_use]
    pub fn sticky_chart_position(&self) -> Option<usize> {
        self.playhead.sticky_chart_position
    }

    /// Progress of the playhead at the last update or scrub release.
    #[must_use]
    pub fn last_progress(&self) -> f64 {
        self.playhead.last_progress
    }

    /// Whether the play loop is producing advance events.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    /// Whether a scrubber drag is active.
    #[must_use]
    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_active()
    }

    /// Current playback speed factor.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.clock.speed()
    }

    /// The movie payload the engine was built from.
    #[must_use]
    pub fn movie(&self) -> &MovieData {
        &self.data
    }

    /// The precomputed index tables.
    #[must_use]
    pub fn transitions(&self) -> &TransitionIndex {
        &self.index
    }

    /// The time model.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The scrubber viewport.
    #[must_use]
    pub fn timeline_viewport(&self) -> &TimelineViewport {
        &self.viewport
    }

    /// The tree at the current position.
    #[must_use]
    pub fn current_tree(&self) -> &Value {
        &self.data.interpolated_trees[self.playhead.current_index]
    }

    /// The aggregated highlight set for the current position.
    #[must_use]
    pub fn current_highlight(&self) -> Vec<TaxonGroup> {
        highlight::aggregate(&self.data, &self.index, self.playhead.current_index)
    }

    /// The alignment window backing the current position.
    #[must_use]
    pub fn current_msa_window(&self) -> MsaWindow {
        let slot = self.index.distance_index(self.playhead.current_index);
        self.msa_model.window_for(slot)
    }

    /// Re-run the movie invariant checks.
    ///
    /// Always `ok` for a running engine (construction enforces the
    /// invariants); exposed so hosts can surface the structured report.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        movie::check(&self.data)
    }
}
