//! Tree-view styling options passed through to the renderer facade.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Styling knobs the engine forwards with every render update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct DisplayOptions {
    /// Morph animation duration between consecutive trees.
    pub animation_ms: u64,
    /// Leaf label font size in points.
    pub label_font_size: f32,
    /// Branch stroke width in pixels.
    pub branch_stroke_width: f32,
    /// Whether internal node labels are drawn.
    pub show_internal_labels: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            animation_ms: 300,
            label_font_size: 12.0,
            branch_stroke_width: 1.5,
            show_internal_labels: false,
        }
    }
}
