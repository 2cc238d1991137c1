//! The immutable movie payload: interpolated trees plus per-tree and
//! per-transition metadata.
//!
//! [`MovieData`] is deserialized once from the producing pipeline's JSON
//! and never mutated. Trees themselves are opaque to this crate; every
//! navigational question is answered from the metadata by
//! [`TransitionIndex`](crate::index::TransitionIndex).

mod metadata;
mod validate;

use std::collections::HashMap;

pub use metadata::{Phase, TreeMeta, TreePairing};
use serde::Deserialize;
use serde_json::Value;
pub use validate::{check, ValidationIssue, ValidationReport};

use crate::error::PhylocineError;

/// Per-pair interpolation run lengths keyed by `tree_pair_key`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SEdgeMetadata {
    /// Number of interpolated trees between each adjacent anchor pair.
    /// A value of 0 means the two anchors are adjacent in the sequence.
    #[serde(default)]
    pub trees_per_s_edge: HashMap<String, usize>,
}

/// Sliding-window parameters of the source alignment.
///
/// `window_size` and `step_size` default to 1; when both are left at 1
/// and the alignment length is known, effective values are inferred as
/// `alignment_length / tree_count` (matching the producing pipeline).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MsaInfo {
    /// Columns covered by one reconstruction window.
    pub window_size: usize,
    /// Columns the window advances between adjacent anchors.
    pub step_size: usize,
    /// Total alignment columns, when the MSA was provided.
    pub alignment_length: Option<usize>,
}

impl Default for MsaInfo {
    fn default() -> Self {
        Self {
            window_size: 1,
            step_size: 1,
            alignment_length: None,
        }
    }
}

impl MsaInfo {
    /// Whether adjacent windows share columns.
    #[must_use]
    pub fn windows_overlapping(&self) -> bool {
        self.step_size < self.window_size
    }
}

/// The immutable input bundle describing one tree movie.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieData {
    /// Ordered sequence of N trees, opaque to the core.
    pub interpolated_trees: Vec<Value>,
    /// One metadata record per tree.
    pub tree_metadata: Vec<TreeMeta>,
    /// Known interpolation run lengths per anchor pair.
    #[serde(default)]
    pub s_edge_metadata: SEdgeMetadata,
    /// Robinson-Foulds distance per transition.
    #[serde(default)]
    pub rfd_list: Vec<f64>,
    /// Weighted Robinson-Foulds distance per transition.
    #[serde(default, alias = "weighted_robinson_foulds_distance_list")]
    pub wrfd_list: Vec<f64>,
    /// Per-tree scale value for the scale chart, when computed.
    #[serde(default)]
    pub scale_list: Option<Vec<f64>>,
    /// One entry per tree naming the lattice edge being modified.
    #[serde(default)]
    pub lattice_edge_tracking: Option<Vec<Option<Value>>>,
    /// One map per transition from stringified lattice-edge keys to
    /// nested lists of taxon-index groups.
    #[serde(default, alias = "to_be_highlighted")]
    pub highlighted_elements: Vec<HashMap<String, Value>>,
    /// Canonical leaf order shared by all trees.
    pub sorted_leaves: Vec<String>,
    /// Alignment window parameters.
    #[serde(default)]
    pub msa: MsaInfo,
    /// Opaque cover data, passed through to hosts.
    #[serde(default)]
    pub covers: Option<Value>,
    /// Original upload file name, when known.
    #[serde(default)]
    pub file_name: Option<String>,
}

impl MovieData {
    /// Parse a movie payload from its JSON wire form.
    ///
    /// Parsing alone does not establish the sequence invariants; those
    /// are enforced when a
    /// [`TransitionIndex`](crate::index::TransitionIndex) is built.
    pub fn from_json_str(json: &str) -> Result<Self, PhylocineError> {
        serde_json::from_str(json)
            .map_err(|e| PhylocineError::MovieParse(e.to_string()))
    }

    /// Number of trees in the flat sequence.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.interpolated_trees.len()
    }

    /// Interpolation run length for a pair key, if known.
    #[must_use]
    pub fn steps_for_pair(&self, pair_key: &str) -> Option<usize> {
        self.s_edge_metadata.trees_per_s_edge.get(pair_key).copied()
    }

    /// The lattice-edge tracking entry for tree `i`, if any.
    #[must_use]
    pub fn lattice_edge(&self, i: usize) -> Option<&Value> {
        self.lattice_edge_tracking
            .as_ref()?
            .get(i)?
            .as_ref()
    }
}
