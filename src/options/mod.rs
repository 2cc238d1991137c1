//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (playback pacing, tree-view styling,
//! keybindings) are consolidated here. Options serialize to/from TOML
//! for user presets and expose a JSON Schema for host UIs.

mod display;
mod keybindings;
mod playback;

use std::path::Path;

pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use playback::PlaybackOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PhylocineError;

/// Top-level options container. All sub-structs use `#[serde(default)]`
/// so partial TOML files (e.g. only overriding `[playback]`) work
/// correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Play-loop pacing and timeline weighting.
    pub playback: PlaybackOptions,
    /// Tree-view styling forwarded to the renderer.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, PhylocineError> {
        let content =
            std::fs::read_to_string(path).map_err(PhylocineError::Io)?;
        let mut options: Self = toml::from_str(&content)
            .map_err(|e| PhylocineError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), PhylocineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PhylocineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PhylocineError::Io)?;
        }
        std::fs::write(path, content).map_err(PhylocineError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
