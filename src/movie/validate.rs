//! Invariant checks over a parsed movie payload.
//!
//! [`check`] is the single surface that reports malformed input. It is
//! run once when a [`TransitionIndex`](crate::index::TransitionIndex)
//! is built (a failed report is fatal) and can be re-run at any time to
//! produce the same structured report.

use std::collections::HashSet;
use std::fmt;

use super::{MovieData, TreePairing};

/// A single violated invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The tree sequence is empty.
    NoTrees,
    /// Metadata length differs from the tree count.
    MetadataLengthMismatch {
        /// Number of trees.
        trees: usize,
        /// Number of metadata records.
        metadata: usize,
    },
    /// The first tree is not an anchor.
    FirstTreeNotAnchor,
    /// A non-anchor tree lacks pairing fields.
    StepWithoutPairing {
        /// Index of the offending tree.
        index: usize,
    },
    /// An anchor-phase tree carries step pairing fields.
    AnchorWithPairing {
        /// Index of the offending tree.
        index: usize,
    },
    /// Step trees between one anchor pair disagree on their pair key.
    MixedPairKeys {
        /// Transition the trees belong to.
        transition: usize,
    },
    /// Trees between an anchor pair do not match the declared run length.
    StepCountMismatch {
        /// The pair key of the transition.
        pair_key: String,
        /// Declared length from `trees_per_s_edge`.
        declared: usize,
        /// Trees actually found strictly between the anchors.
        actual: usize,
    },
    /// A step tree references a pair key absent from `trees_per_s_edge`.
    UnknownPairKey {
        /// The unresolved key.
        pair_key: String,
    },
    /// `highlighted_elements` length differs from the transition count.
    HighlightLengthMismatch {
        /// Expected transition count.
        expected: usize,
        /// Actual list length.
        actual: usize,
    },
    /// A distance list length differs from the transition count.
    DistanceLengthMismatch {
        /// Which list is affected.
        list: &'static str,
        /// Expected transition count.
        expected: usize,
        /// Actual list length.
        actual: usize,
    },
    /// `lattice_edge_tracking`, when present, must have one entry per tree.
    LatticeTrackingLengthMismatch {
        /// Expected tree count.
        expected: usize,
        /// Actual list length.
        actual: usize,
    },
    /// `scale_list`, when present, must have one entry per tree.
    ScaleLengthMismatch {
        /// Expected tree count.
        expected: usize,
        /// Actual list length.
        actual: usize,
    },
    /// `sorted_leaves` is empty.
    NoLeaves,
    /// A leaf name appears more than once in `sorted_leaves`.
    DuplicateLeaf {
        /// The repeated name.
        name: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTrees => write!(f, "movie contains no trees"),
            Self::MetadataLengthMismatch { trees, metadata } => write!(
                f,
                "{trees} trees but {metadata} metadata records"
            ),
            Self::FirstTreeNotAnchor => {
                write!(f, "first tree is not an anchor")
            }
            Self::StepWithoutPairing { index } => write!(
                f,
                "tree {index} has a step phase but no pairing fields"
            ),
            Self::AnchorWithPairing { index } => write!(
                f,
                "tree {index} has an anchor phase but carries pairing fields"
            ),
            Self::MixedPairKeys { transition } => write!(
                f,
                "transition {transition} mixes different pair keys"
            ),
            Self::StepCountMismatch {
                pair_key,
                declared,
                actual,
            } => write!(
                f,
                "pair '{pair_key}' declares {declared} steps but the \
                 sequence contains {actual}"
            ),
            Self::UnknownPairKey { pair_key } => write!(
                f,
                "pair key '{pair_key}' missing from trees_per_s_edge"
            ),
            Self::HighlightLengthMismatch { expected, actual } => write!(
                f,
                "highlighted_elements has {actual} entries, expected \
                 {expected}"
            ),
            Self::DistanceLengthMismatch {
                list,
                expected,
                actual,
            } => write!(
                f,
                "{list} has {actual} entries, expected {expected}"
            ),
            Self::LatticeTrackingLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "lattice_edge_tracking has {actual} entries, expected \
                     {expected}"
                )
            }
            Self::ScaleLengthMismatch { expected, actual } => write!(
                f,
                "scale_list has {actual} entries, expected {expected}"
            ),
            Self::NoLeaves => write!(f, "sorted_leaves is empty"),
            Self::DuplicateLeaf { name } => {
                write!(f, "leaf '{name}' appears more than once")
            }
        }
    }
}

/// Outcome of an invariant check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Every violated invariant, in discovery order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether all invariants hold.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "ok");
        }
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Check every sequence invariant and return a structured report.
#[must_use]
pub fn check(data: &MovieData) -> ValidationReport {
    let mut issues = Vec::new();

    let n = data.tree_count();
    if n == 0 {
        issues.push(ValidationIssue::NoTrees);
    }
    if data.tree_metadata.len() != n {
        issues.push(ValidationIssue::MetadataLengthMismatch {
            trees: n,
            metadata: data.tree_metadata.len(),
        });
        // Positional checks below assume aligned metadata.
        return ValidationReport { issues };
    }

    check_pairing_consistency(data, &mut issues);

    let anchors: Vec<usize> = data
        .tree_metadata
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.is_anchor().then_some(i))
        .collect();

    if anchors.first() != Some(&0) && n > 0 {
        issues.push(ValidationIssue::FirstTreeNotAnchor);
    }

    check_transitions(data, &anchors, &mut issues);

    let transition_count = anchors.len().saturating_sub(1);
    check_lengths(data, n, transition_count, &mut issues);
    check_leaves(data, &mut issues);

    ValidationReport { issues }
}

/// Phase classification and pairing fields must agree per tree.
fn check_pairing_consistency(
    data: &MovieData,
    issues: &mut Vec<ValidationIssue>,
) {
    for (i, meta) in data.tree_metadata.iter().enumerate() {
        match (&meta.pairing, meta.is_anchor()) {
            (TreePairing::Anchor, false) => {
                issues.push(ValidationIssue::StepWithoutPairing { index: i });
            }
            (TreePairing::Step { .. }, true) => {
                issues.push(ValidationIssue::AnchorWithPairing { index: i });
            }
            _ => {}
        }
    }
}

/// Trees strictly between adjacent anchors must match the declared run
/// length for their pair key, and agree on that key.
fn check_transitions(
    data: &MovieData,
    anchors: &[usize],
    issues: &mut Vec<ValidationIssue>,
) {
    for (t, pair) in anchors.windows(2).enumerate() {
        let (lo, hi) = (pair[0], pair[1]);
        let actual = hi - lo - 1;

        let mut pair_key: Option<&str> = None;
        let mut mixed = false;
        for meta in &data.tree_metadata[lo + 1..hi] {
            if let Some(key) = meta.pairing.pair_key() {
                match pair_key {
                    None => pair_key = Some(key),
                    Some(seen) if seen != key => mixed = true,
                    Some(_) => {}
                }
            }
        }
        if mixed {
            issues.push(ValidationIssue::MixedPairKeys { transition: t });
        }

        // A zero-step transition leaves no tree to carry the key, so
        // the declared length cannot be cross-checked.
        let Some(key) = pair_key else { continue };
        match data.steps_for_pair(key) {
            Some(declared) if declared != actual => {
                issues.push(ValidationIssue::StepCountMismatch {
                    pair_key: key.to_owned(),
                    declared,
                    actual,
                });
            }
            Some(_) => {}
            None => {
                issues.push(ValidationIssue::UnknownPairKey {
                    pair_key: key.to_owned(),
                });
            }
        }
    }
}

/// Per-transition and per-tree list lengths.
fn check_lengths(
    data: &MovieData,
    n: usize,
    transition_count: usize,
    issues: &mut Vec<ValidationIssue>,
) {
    if data.highlighted_elements.len() != transition_count {
        issues.push(ValidationIssue::HighlightLengthMismatch {
            expected: transition_count,
            actual: data.highlighted_elements.len(),
        });
    }
    if data.rfd_list.len() != transition_count {
        issues.push(ValidationIssue::DistanceLengthMismatch {
            list: "rfd_list",
            expected: transition_count,
            actual: data.rfd_list.len(),
        });
    }
    if data.wrfd_list.len() != transition_count {
        issues.push(ValidationIssue::DistanceLengthMismatch {
            list: "wrfd_list",
            expected: transition_count,
            actual: data.wrfd_list.len(),
        });
    }
    if let Some(tracking) = &data.lattice_edge_tracking {
        if tracking.len() != n {
            issues.push(ValidationIssue::LatticeTrackingLengthMismatch {
                expected: n,
                actual: tracking.len(),
            });
        }
    }
    if let Some(scales) = &data.scale_list {
        if scales.len() != n {
            issues.push(ValidationIssue::ScaleLengthMismatch {
                expected: n,
                actual: scales.len(),
            });
        }
    }
}

/// `sorted_leaves` must be non-empty with unique entries.
fn check_leaves(data: &MovieData, issues: &mut Vec<ValidationIssue>) {
    if data.sorted_leaves.is_empty() {
        issues.push(ValidationIssue::NoLeaves);
    }
    let mut seen = HashSet::new();
    for name in &data.sorted_leaves {
        if !seen.insert(name.as_str()) {
            issues.push(ValidationIssue::DuplicateLeaf {
                name: name.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;

    #[test]
    fn reference_movies_validate() {
        assert!(check(&fixtures::three_anchor_movie()).ok());
        assert!(check(&fixtures::highlight_movie()).ok());
        assert!(check(&fixtures::single_tree_movie()).ok());
    }

    #[test]
    fn first_tree_must_be_anchor() {
        let mut movie = fixtures::three_anchor_movie();
        movie.tree_metadata.swap(0, 1);
        let report = check(&movie);
        assert!(report
            .issues
            .contains(&ValidationIssue::FirstTreeNotAnchor));
    }

    #[test]
    fn declared_step_count_is_enforced() {
        let mut movie = fixtures::three_anchor_movie();
        let _ = movie
            .s_edge_metadata
            .trees_per_s_edge
            .insert("0_1".to_owned(), 5);
        let report = check(&movie);
        assert!(report.issues.iter().any(|i| matches!(
            i,
            ValidationIssue::StepCountMismatch { declared: 5, actual: 2, .. }
        )));
    }

    #[test]
    fn unknown_pair_key_is_reported() {
        let mut movie = fixtures::three_anchor_movie();
        let _ = movie.s_edge_metadata.trees_per_s_edge.remove("0_1");
        let report = check(&movie);
        assert!(report.issues.iter().any(|i| matches!(
            i,
            ValidationIssue::UnknownPairKey { .. }
        )));
    }

    #[test]
    fn distance_lists_must_cover_every_transition() {
        let mut movie = fixtures::three_anchor_movie();
        let _ = movie.rfd_list.pop();
        let report = check(&movie);
        assert!(report.issues.iter().any(|i| matches!(
            i,
            ValidationIssue::DistanceLengthMismatch { list: "rfd_list", .. }
        )));
    }

    #[test]
    fn highlight_list_must_cover_every_transition() {
        let mut movie = fixtures::three_anchor_movie();
        let _ = movie.highlighted_elements.pop();
        let report = check(&movie);
        assert!(!report.ok());
    }

    #[test]
    fn duplicate_leaves_are_reported() {
        let mut movie = fixtures::three_anchor_movie();
        movie.sorted_leaves.push("taxonA".to_owned());
        let report = check(&movie);
        assert!(report.issues.iter().any(|i| matches!(
            i,
            ValidationIssue::DuplicateLeaf { .. }
        )));
        let rendered = report.to_string();
        assert!(rendered.contains("taxonA"));
    }

    #[test]
    fn misaligned_metadata_short_circuits() {
        let mut movie = fixtures::three_anchor_movie();
        let _ = movie.tree_metadata.pop();
        let report = check(&movie);
        assert_eq!(
            report.issues,
            vec![ValidationIssue::MetadataLengthMismatch {
                trees: 5,
                metadata: 4,
            }]
        );
    }
}
