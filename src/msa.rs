//! Alignment window arithmetic for the MSA panel.
//!
//! Each anchor tree was reconstructed from a sliding window over the
//! source alignment; [`MsaWindowModel`] maps a transition slot back to
//! the column range that window covered so the MSA view can follow the
//! movie. Window centers are monotone non-decreasing in the transition
//! slot and ranges are contiguous.

use crate::movie::MsaInfo;

/// A 1-based, inclusive column range with its center column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsaWindow {
    /// First column of the window.
    pub start: usize,
    /// Last column of the window.
    pub end: usize,
    /// Center column, clamped into the range.
    pub mid: usize,
}

/// Maps transition slots to alignment column windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsaWindowModel {
    window_size: usize,
    step_size: usize,
    columns: Option<usize>,
}

impl MsaWindowModel {
    /// Build the window model for a movie with `anchor_count`
    /// reconstructed trees.
    ///
    /// When both parameters were left at their default of 1 and the
    /// alignment length is known, effective values are inferred as
    /// `alignment_length / anchor_count`, matching the producing
    /// pipeline's behavior for untagged uploads.
    #[must_use]
    pub fn new(info: &MsaInfo, anchor_count: usize) -> Self {
        let (window_size, step_size) = match info.alignment_length {
            Some(columns)
                if info.window_size == 1 && info.step_size == 1 =>
            {
                let inferred = if anchor_count <= 1 {
                    columns
                } else {
                    (columns / anchor_count).max(1)
                };
                (inferred, inferred)
            }
            _ => (info.window_size.max(1), info.step_size.max(1)),
        };
        Self {
            window_size,
            step_size,
            columns: info.alignment_length,
        }
    }

    /// Effective window size after inference.
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Effective step size after inference.
    #[must_use]
    pub fn step_size(&self) -> usize {
        self.step_size
    }

    /// The column window for transition slot `k`.
    ///
    /// The center advances by one step per slot; the range extends half
    /// a window to each side, clamped to column 1 at the left and to
    /// the alignment length at the right when it is known.
    #[must_use]
    pub fn window_for(&self, k: usize) -> MsaWindow {
        let center = (k * self.step_size).max(1);
        let center = match self.columns {
            Some(columns) => center.min(columns.max(1)),
            None => center,
        };
        let half = self.window_size / 2;

        let start = center.saturating_sub(half).max(1);
        let mut end = center + half;
        if let Some(columns) = self.columns {
            end = end.min(columns.max(1));
        }

        MsaWindow {
            start,
            end: end.max(start),
            mid: center.clamp(start, end.max(start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(
        window_size: usize,
        step_size: usize,
        alignment_length: Option<usize>,
    ) -> MsaInfo {
        MsaInfo {
            window_size,
            step_size,
            alignment_length,
        }
    }

    #[test]
    fn window_tracks_the_step() {
        let model = MsaWindowModel::new(&info(4, 2, Some(20)), 3);
        assert_eq!(
            model.window_for(1),
            MsaWindow {
                start: 1,
                end: 4,
                mid: 2
            }
        );
        assert_eq!(
            model.window_for(5),
            MsaWindow {
                start: 8,
                end: 12,
                mid: 10
            }
        );
    }

    #[test]
    fn window_clamps_at_both_alignment_ends() {
        let model = MsaWindowModel::new(&info(10, 4, Some(20)), 3);
        let first = model.window_for(0);
        assert_eq!(first.start, 1);
        let last = model.window_for(100);
        assert_eq!(last.end, 20);
        assert!(last.start <= last.mid && last.mid <= last.end);
    }

    #[test]
    fn centers_are_monotone_in_the_slot() {
        let model = MsaWindowModel::new(&info(6, 3, Some(50)), 4);
        let mut previous = 0;
        for k in 0..30 {
            let window = model.window_for(k);
            assert!(window.mid >= previous);
            assert!(window.start <= window.end);
            previous = window.mid;
        }
    }

    #[test]
    fn unknown_alignment_length_leaves_right_edge_open() {
        let model = MsaWindowModel::new(&info(4, 10, None), 3);
        assert_eq!(model.window_for(7).end, 72);
    }

    #[test]
    fn default_parameters_are_inferred_from_the_alignment() {
        let model = MsaWindowModel::new(&info(1, 1, Some(100)), 5);
        assert_eq!(model.window_size(), 20);
        assert_eq!(model.step_size(), 20);
    }

    #[test]
    fn inference_with_one_anchor_covers_everything() {
        let model = MsaWindowModel::new(&info(1, 1, Some(100)), 1);
        assert_eq!(model.window_size(), 100);
    }

    #[test]
    fn explicit_parameters_are_never_inferred() {
        let model = MsaWindowModel::new(&info(4, 2, Some(100)), 5);
        assert_eq!(model.window_size(), 4);
        assert_eq!(model.step_size(), 2);
    }
}
