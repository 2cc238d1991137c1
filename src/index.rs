//! Pure index arithmetic over the flat tree sequence.
//!
//! [`TransitionIndex`] answers every navigational and semantic question
//! the rest of the crate asks: which trees are anchors, which transition
//! a tree belongs to, where the neighboring anchors sit, and which
//! per-transition slot to use for distance and highlight lookups.
//! Construction is O(N) and runs the full invariant check; every query
//! afterwards is O(1) (anchor neighbor lookup is a binary search) and
//! clamps out-of-range input instead of panicking.

use crate::error::PhylocineError;
use crate::movie::{self, MovieData};

/// Precomputed lookup tables for one movie sequence.
#[derive(Debug, Clone)]
pub struct TransitionIndex {
    tree_count: usize,
    /// Positions of anchor trees, strictly increasing, starting at 0.
    anchor_indices: Vec<usize>,
    /// Transition each tree belongs to. The closing anchor of the last
    /// transition maps to the (one-past-the-end) anchor ordinal; trees
    /// past the last anchor map to `None`.
    index_to_transition: Vec<Option<usize>>,
    /// 0 for anchors, the 1-based step number otherwise.
    index_to_step: Vec<usize>,
    /// Whether each tree's phase participates in highlighting.
    participates: Vec<bool>,
    /// Interpolation run length per transition.
    steps: Vec<usize>,
    /// Pair key per transition; `None` when the run is empty.
    pair_keys: Vec<Option<String>>,
}

impl TransitionIndex {
    /// Build the lookup tables, enforcing the sequence invariants.
    ///
    /// A movie that fails [`movie::check`] is rejected with
    /// [`PhylocineError::InvalidMovie`] carrying the full report.
    pub fn new(data: &MovieData) -> Result<Self, PhylocineError> {
        let report = movie::check(data);
        if !report.ok() {
            return Err(PhylocineError::InvalidMovie(report));
        }

        let n = data.tree_count();
        let anchor_indices: Vec<usize> = data
            .tree_metadata
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.is_anchor().then_some(i))
            .collect();

        let mut index_to_transition = vec![None; n];
        let mut steps = Vec::new();
        let mut pair_keys = Vec::new();
        for (t, pair) in anchor_indices.windows(2).enumerate() {
            let (lo, hi) = (pair[0], pair[1]);
            for slot in &mut index_to_transition[lo..hi] {
                *slot = Some(t);
            }
            steps.push(hi - lo - 1);
            pair_keys.push(
                data.tree_metadata[lo + 1..hi]
                    .first()
                    .and_then(|m| m.pairing.pair_key())
                    .map(str::to_owned),
            );
        }
        if let Some(&last) = anchor_indices.last() {
            index_to_transition[last] = Some(anchor_indices.len() - 1);
        }

        let index_to_step = data
            .tree_metadata
            .iter()
            .map(|m| m.pairing.step_number())
            .collect();
        let participates = data
            .tree_metadata
            .iter()
            .map(|m| m.phase.participates_in_highlight())
            .collect();

        Ok(Self {
            tree_count: n,
            anchor_indices,
            index_to_transition,
            index_to_step,
            participates,
            steps,
            pair_keys,
        })
    }

    /// Number of trees in the sequence.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.tree_count
    }

    /// Anchor positions in ascending order.
    #[must_use]
    pub fn anchor_indices(&self) -> &[usize] {
        &self.anchor_indices
    }

    /// Number of transitions (adjacent anchor pairs).
    #[must_use]
    pub fn transition_count(&self) -> usize {
        self.anchor_indices.len().saturating_sub(1)
    }

    /// Whether tree `i` is an anchor.
    #[must_use]
    pub fn is_anchor(&self, i: usize) -> bool {
        self.anchor_indices.binary_search(&self.clamp(i)).is_ok()
    }

    /// The transition tree `i` belongs to.
    ///
    /// The closing anchor of transition `t` reports `t + 1` (it opens the
    /// next segment); `None` is returned only for trees sitting past the
    /// last anchor of a degenerate sequence.
    #[must_use]
    pub fn transition_of(&self, i: usize) -> Option<usize> {
        self.index_to_transition[self.clamp(i)]
    }

    /// 0 for anchors, the 1-based step number for interpolated trees.
    #[must_use]
    pub fn step_in_transition(&self, i: usize) -> usize {
        self.index_to_step[self.clamp(i)]
    }

    /// Interpolation run length of transition `t` (0 allowed).
    #[must_use]
    pub fn steps_in_transition(&self, t: usize) -> usize {
        if self.steps.is_empty() {
            return 0;
        }
        self.steps[t.min(self.steps.len() - 1)]
    }

    /// The pair key of transition `t`, when its run is non-empty.
    #[must_use]
    pub fn pair_key(&self, t: usize) -> Option<&str> {
        self.pair_keys.get(t)?.as_deref()
    }

    /// Flat tree index of `step` within transition `t`.
    ///
    /// Step 0 is the opening anchor; steps beyond the run are clamped to
    /// the closing anchor.
    #[must_use]
    pub fn tree_index_of_step(&self, t: usize, step: usize) -> usize {
        if self.steps.is_empty() {
            return 0;
        }
        let t = t.min(self.steps.len() - 1);
        self.anchor_indices[t] + step.min(self.steps[t] + 1)
    }

    /// The next position in the flat sequence, clamped at the end.
    #[must_use]
    pub fn next_position(&self, i: usize) -> usize {
        let i = self.clamp(i);
        if i + 1 < self.tree_count {
            i + 1
        } else {
            i
        }
    }

    /// The previous position in the flat sequence, clamped at the start.
    #[must_use]
    pub fn previous_position(&self, i: usize) -> usize {
        self.clamp(i).saturating_sub(1)
    }

    /// The smallest anchor position strictly greater than `i`, or `i`
    /// when none exists.
    #[must_use]
    pub fn next_anchor_index(&self, i: usize) -> usize {
        let i = self.clamp(i);
        let at = self.anchor_indices.partition_point(|&a| a <= i);
        self.anchor_indices.get(at).copied().unwrap_or(i)
    }

    /// The largest anchor position strictly less than `i`, or `i` when
    /// none exists.
    #[must_use]
    pub fn previous_anchor_index(&self, i: usize) -> usize {
        let i = self.clamp(i);
        let at = self.anchor_indices.partition_point(|&a| a < i);
        if at == 0 {
            i
        } else {
            self.anchor_indices[at - 1]
        }
    }

    /// The transition slot used for distance lookups at tree `i`.
    ///
    /// This is [`transition_of`](Self::transition_of) clamped into the
    /// valid transition range, so both anchors of a transition resolve
    /// to it. Meaningless (always 0) for movies without transitions.
    #[must_use]
    pub fn distance_index(&self, i: usize) -> usize {
        let t = self.transition_of(i).unwrap_or(0);
        t.min(self.transition_count().saturating_sub(1))
    }

    /// The transition slot used for highlight lookups at tree `i`.
    ///
    /// A tree participates in the highlight segment of transition `t`
    /// only while it sits inside the segment *and* its phase modifies
    /// the tracked lattice edge; anchors bounding the segment yield
    /// `None`.
    #[must_use]
    pub fn highlighting_index(&self, i: usize) -> Option<usize> {
        let i = self.clamp(i);
        let t = self.index_to_transition[i]?;
        if t >= self.transition_count() || !self.participates[i] {
            return None;
        }
        Some(t)
    }

    fn clamp(&self, i: usize) -> usize {
        // tree_count >= 1 is guaranteed by construction.
        i.min(self.tree_count - 1)
    }
}
