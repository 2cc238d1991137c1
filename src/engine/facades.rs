//! Contracts for the external views driven by the engine.
//!
//! Rendering is out of scope for this crate; the engine pushes value
//! payloads to whatever implements these traits. Payloads borrow from
//! the engine only for the duration of the call and never hand out
//! references back into it. Facade failures are reported as `Result`s
//! and contained at the publish boundary.

use serde_json::Value;

use crate::error::PhylocineError;
use crate::highlight::TaxonGroup;
use crate::msa::MsaWindow;
use crate::options::DisplayOptions;

/// Which data series the chart panel is currently plotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    /// Robinson-Foulds distance per transition.
    #[default]
    RobinsonFoulds,
    /// Weighted Robinson-Foulds distance per transition.
    WeightedRobinsonFoulds,
    /// Per-tree scale values.
    Scale,
}

impl ChartKind {
    /// Whether the cursor addresses transitions (as opposed to trees).
    #[must_use]
    pub fn is_distance_based(self) -> bool {
        matches!(self, Self::RobinsonFoulds | Self::WeightedRobinsonFoulds)
    }
}

/// Payload for a full tree render after a position change.
#[derive(Debug, Clone)]
pub struct RenderUpdate<'a> {
    /// The tree to display.
    pub tree: &'a Value,
    /// The previously displayed tree, for transition-type detection.
    pub previous_tree: Option<&'a Value>,
    /// Taxon groups to emphasize.
    pub highlight: &'a [TaxonGroup],
    /// Canonical leaf order shared by all trees.
    pub leaf_order: &'a [String],
    /// Animation duration for the morph into this tree.
    pub duration_ms: u64,
    /// Styling knobs for the tree view.
    pub styles: &'a DisplayOptions,
    /// Keep the camera still (micro-steps) instead of re-centering.
    pub skip_auto_center: bool,
}

/// Payload for one interpolated preview frame while scrubbing.
#[derive(Debug, Clone)]
pub struct InterpolationFrame<'a> {
    /// Tree the pointer sits in.
    pub from_tree: &'a Value,
    /// Interpolation target tree.
    pub to_tree: &'a Value,
    /// Fraction in `[0, 1)` between the two.
    pub frac: f64,
}

/// Payload for the distance/scale chart.
#[derive(Debug, Clone)]
pub struct ChartUpdate<'a> {
    /// Robinson-Foulds series, one value per transition.
    pub distances: &'a [f64],
    /// Weighted Robinson-Foulds series, one value per transition.
    pub weighted_distances: &'a [f64],
    /// Per-tree scale series, when the movie carries one.
    pub scales: Option<&'a [f64]>,
    /// Active series.
    pub kind: ChartKind,
    /// Cursor position: a transition for distance series, a tree for
    /// the scale series.
    pub cursor: usize,
    /// User-pinned chart position, surviving chart-initiated jumps.
    pub sticky: Option<usize>,
}

/// Payload for the MSA panel.
#[derive(Debug, Clone)]
pub struct MsaWindowUpdate<'a> {
    /// Alignment columns to bring into view.
    pub window: MsaWindow,
    /// Taxon groups to emphasize in the row labels.
    pub highlighted_taxa: &'a [TaxonGroup],
    /// Current tree.
    pub tree_index: usize,
    /// Transition slot the window was derived from.
    pub transition_index: usize,
}

/// Payload for the scrubber widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubberUpdate {
    /// Playhead progress in `[0, 1]`.
    pub progress: f64,
    /// Total duration of the movie time axis.
    pub total_duration: f64,
    /// Currently visible `(start, end)` time range.
    pub visible_range: (f64, f64),
}

/// The animated tree view.
pub trait TreeRenderer {
    /// Display a tree, morphing from the previous one.
    fn update(
        &mut self,
        update: &RenderUpdate<'_>,
    ) -> Result<(), PhylocineError>;

    /// Display an interpolated frame between two adjacent trees.
    fn render_interpolated_frame(
        &mut self,
        frame: &InterpolationFrame<'_>,
    ) -> Result<(), PhylocineError>;
}

/// The per-transition distance (or per-tree scale) chart.
pub trait DistanceChart {
    /// Redraw with a new cursor or series selection.
    fn update(
        &mut self,
        update: &ChartUpdate<'_>,
    ) -> Result<(), PhylocineError>;
}

/// The multiple-sequence-alignment panel.
pub trait MsaPanel {
    /// Scroll to the window backing the current tree.
    fn sync_window(
        &mut self,
        update: &MsaWindowUpdate<'_>,
    ) -> Result<(), PhylocineError>;
}

/// The timeline scrubber widget.
pub trait ScrubberView {
    /// Move the position indicator.
    fn update(
        &mut self,
        update: &ScrubberUpdate,
    ) -> Result<(), PhylocineError>;
}

/// The set of views one engine drives.
pub struct Facades {
    /// Animated tree view.
    pub renderer: Box<dyn TreeRenderer>,
    /// Distance/scale chart.
    pub chart: Box<dyn DistanceChart>,
    /// MSA panel.
    pub msa: Box<dyn MsaPanel>,
    /// Scrubber widget.
    pub scrubber: Box<dyn ScrubberView>,
}

impl Facades {
    /// A facade set that ignores every update. Hosts typically start
    /// from this and replace the views they actually mount.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            renderer: Box::new(NoopFacade),
            chart: Box::new(NoopFacade),
            msa: Box::new(NoopFacade),
            scrubber: Box::new(NoopFacade),
        }
    }
}

impl std::fmt::Debug for Facades {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Facades").finish_non_exhaustive()
    }
}

/// Ignores every update.
struct NoopFacade;

impl TreeRenderer for NoopFacade {
    fn update(
        &mut self,
        _update: &RenderUpdate<'_>,
    ) -> Result<(), PhylocineError> {
        Ok(())
    }

    fn render_interpolated_frame(
        &mut self,
        _frame: &InterpolationFrame<'_>,
    ) -> Result<(), PhylocineError> {
        Ok(())
    }
}

impl DistanceChart for NoopFacade {
    fn update(
        &mut self,
        _update: &ChartUpdate<'_>,
    ) -> Result<(), PhylocineError> {
        Ok(())
    }
}

impl MsaPanel for NoopFacade {
    fn sync_window(
        &mut self,
        _update: &MsaWindowUpdate<'_>,
    ) -> Result<(), PhylocineError> {
        Ok(())
    }
}

impl ScrubberView for NoopFacade {
    fn update(
        &mut self,
        _update: &ScrubberUpdate,
    ) -> Result<(), PhylocineError> {
        Ok(())
    }
}
