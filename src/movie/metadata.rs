//! Per-tree metadata: interpolation phases and anchor/step pairing.

use serde::Deserialize;

/// The stage of the interpolation algorithm that produced a tree.
///
/// Anchor trees carry [`Phase::Original`] or [`Phase::Full`]; every other
/// phase marks an intermediate tree somewhere along a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// A reconstructed tree at a transition boundary.
    Original,
    /// Subtree being moved down toward its destination.
    DownPhase,
    /// Sidegrafted subtrees collapsing onto the moving edge.
    CollapsePhase,
    /// Leaf order being rearranged toward the target ordering.
    ReorderPhase,
    /// Final positioning just before the topology snap.
    PreSnapPhase,
    /// The topology change itself.
    SnapPhase,
    /// Consensus-like intermediate shared by both anchor topologies.
    Consensus,
    /// A fully resolved anchor tree.
    Full,
}

impl Phase {
    /// Whether this phase marks an anchor tree.
    #[must_use]
    pub fn is_anchor(self) -> bool {
        matches!(self, Self::Original | Self::Full)
    }

    /// Whether trees in this phase contribute to subtree highlighting.
    ///
    /// The down phase moves the subtree without modifying the lattice
    /// edge, so it is excluded along with the anchors.
    #[must_use]
    pub fn participates_in_highlight(self) -> bool {
        matches!(
            self,
            Self::CollapsePhase
                | Self::ReorderPhase
                | Self::PreSnapPhase
                | Self::SnapPhase
                | Self::Consensus
        )
    }
}

/// Anchor/step classification of a tree within the flat sequence.
///
/// The wire format models this with maybe-present fields
/// (`tree_pair_key`, `step_in_pair`); here it is a proper sum so step
/// trees always carry both.
#[derive(Debug, Clone, PartialEq)]
pub enum TreePairing {
    /// An anchor tree sitting at a transition boundary.
    Anchor,
    /// An interpolated tree strictly between two anchors.
    Step {
        /// Identifies which adjacent anchor pair this tree belongs to.
        tree_pair_key: String,
        /// 1-based position within the pair's interpolation run.
        step_in_pair: usize,
        /// Opaque identifier of the sub-edge being modified, if any.
        s_edge_tracker: Option<serde_json::Value>,
    },
}

impl TreePairing {
    /// The pair key for step trees, `None` for anchors.
    #[must_use]
    pub fn pair_key(&self) -> Option<&str> {
        match self {
            Self::Anchor => None,
            Self::Step { tree_pair_key, .. } => Some(tree_pair_key),
        }
    }

    /// The 1-based step number for step trees, 0 for anchors.
    #[must_use]
    pub fn step_number(&self) -> usize {
        match self {
            Self::Anchor => 0,
            Self::Step { step_in_pair, .. } => *step_in_pair,
        }
    }
}

/// Metadata record for a single tree in the movie sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeMeta {
    /// Human-readable tree name from the producing pipeline.
    pub tree_name: String,
    /// Interpolation phase that produced this tree.
    pub phase: Phase,
    /// Anchor/step classification.
    pub pairing: TreePairing,
}

impl TreeMeta {
    /// Whether this record classifies as an anchor by phase.
    #[must_use]
    pub fn is_anchor(&self) -> bool {
        self.phase.is_anchor()
    }
}

/// Wire shape with optional pairing fields, folded into [`TreePairing`]
/// during deserialization.
#[derive(Deserialize)]
struct RawTreeMeta {
    tree_name: String,
    phase: Phase,
    #[serde(default)]
    tree_pair_key: Option<String>,
    #[serde(default)]
    step_in_pair: Option<usize>,
    #[serde(default)]
    s_edge_tracker: Option<serde_json::Value>,
}

impl<'de> Deserialize<'de> for TreeMeta {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawTreeMeta::deserialize(deserializer)?;
        let pairing = match (raw.tree_pair_key, raw.step_in_pair) {
            (Some(tree_pair_key), Some(step_in_pair)) => TreePairing::Step {
                tree_pair_key,
                step_in_pair,
                s_edge_tracker: raw.s_edge_tracker,
            },
            (None, _) => TreePairing::Anchor,
            (Some(key), None) => {
                return Err(serde::de::Error::custom(format!(
                    "tree '{}' carries tree_pair_key '{key}' without \
                     step_in_pair",
                    raw.tree_name
                )));
            }
        };
        Ok(Self {
            tree_name: raw.tree_name,
            phase: raw.phase,
            pairing,
        })
    }
}
