//! Configurable keyboard bindings mapping actions to key codes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

/// Maps each bindable action to a key string (e.g. `StepForward` →
/// `"ArrowRight"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeybindingOptions {
    /// Action → key string bindings.
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::StepForward, "ArrowRight".into()),
            (KeyAction::StepBackward, "ArrowLeft".into()),
            (KeyAction::JumpToNextAnchor, "Shift+ArrowRight".into()),
            (KeyAction::JumpToPreviousAnchor, "Shift+ArrowLeft".into()),
            (KeyAction::TogglePlayback, "Space".into()),
            (KeyAction::GoToStart, "Home".into()),
            (KeyAction::GoToEnd, "End".into()),
            (KeyAction::FitTimeline, "KeyF".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}
