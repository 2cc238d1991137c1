//! Keyboard action vocabulary.
//!
//! Key strings are platform `code` values (plus a `Shift+` prefix for
//! shifted variants); the mapping from keys to actions lives in
//! [`KeybindingOptions`](crate::options::KeybindingOptions) and the
//! dispatch in
//! [`MovieEngine::handle_key`](crate::engine::MovieEngine::handle_key).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A bindable user action.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum KeyAction {
    /// Advance one tree.
    StepForward,
    /// Go back one tree.
    StepBackward,
    /// Jump to the next anchor tree.
    JumpToNextAnchor,
    /// Jump to the previous anchor tree.
    JumpToPreviousAnchor,
    /// Toggle play/pause.
    TogglePlayback,
    /// Jump to the first tree.
    GoToStart,
    /// Jump to the last tree.
    GoToEnd,
    /// Reset the scrubber viewport to the whole movie.
    FitTimeline,
}
