//! The engine's complete navigation vocabulary.
//!
//! Every position change, whether triggered by a key press, a chart
//! click, a scrubber release, or the play loop, is represented as a
//! `MovieCommand`. Consumers construct commands and pass them to
//! [`MovieEngine::execute`](super::MovieEngine::execute); the engine
//! never cares *how* a command was triggered.

/// A discrete navigation operation over the tree sequence.
///
/// Commands never fail toward the caller: out-of-range parameters are
/// dropped with a diagnostic log and the position is left untouched.
///
/// ```ignore
/// engine.execute(MovieCommand::Forward);
/// engine.execute(MovieCommand::GoToTransition { transition: 2 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieCommand {
    // ── Stepping ────────────────────────────────────────────────────
    /// Advance one tree, clamped at the end of the sequence.
    Forward,

    /// Go back one tree, clamped at the start.
    Backward,

    /// User-initiated single step forward; pauses playback first.
    ManualNext,

    /// User-initiated single step backward; pauses playback first.
    ManualPrev,

    // ── Anchor jumps ────────────────────────────────────────────────
    /// Jump to the nearest anchor after the current tree.
    NextAnchor,

    /// Jump to the nearest anchor before the current tree.
    PrevAnchor,

    // ── Absolute jumps ──────────────────────────────────────────────
    /// Jump to an exact tree; out-of-range indices are dropped.
    GoToPosition {
        /// Target position in the flat sequence.
        index: usize,
    },

    /// Jump to a tree from a scrubber release; the index is clamped
    /// into range instead of dropped.
    HandleDrag {
        /// Target position in the flat sequence.
        index: usize,
    },

    /// Jump to the opening anchor of a transition. Unlike every other
    /// jump this preserves the sticky chart position, because it is
    /// issued by the chart click that set it.
    GoToTransition {
        /// Target transition ordinal.
        transition: usize,
    },

    // ── Chart coupling ──────────────────────────────────────────────
    /// Pin a chart position without moving the playhead.
    SetStickyPosition {
        /// Transition ordinal to pin.
        transition: usize,
    },
}

impl MovieCommand {
    /// Whether this command is a micro-step that should keep the
    /// camera still rather than re-centering the view.
    #[must_use]
    pub fn is_micro_step(self) -> bool {
        matches!(
            self,
            Self::Forward | Self::Backward | Self::ManualNext | Self::ManualPrev
        )
    }

    /// Whether executing this command clears the sticky chart position.
    #[must_use]
    pub fn clears_sticky(self) -> bool {
        !matches!(
            self,
            Self::GoToTransition { .. } | Self::SetStickyPosition { .. }
        )
    }
}
