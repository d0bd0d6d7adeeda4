//! Session-scoped tool settings.
//!
//! Each editing session owns its own settings value, injected into the
//! editor at construction. The editor reads current values at paint time
//! rather than snapshotting them per stroke.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::types::{ColorParseError, Rgb, SegmentStyle, Tool};

/// Named brush size for quick selection.
#[derive(Debug, Clone, Copy)]
pub struct BrushSizePreset {
    pub label: &'static str,
    pub size: f32,
}

/// Stepped quick sizes exposed next to the free slider.
pub const BRUSH_SIZE_PRESETS: [BrushSizePreset; 4] = [
    BrushSizePreset { label: "S", size: 10.0 },
    BrushSizePreset { label: "M", size: 30.0 },
    BrushSizePreset { label: "L", size: 60.0 },
    BrushSizePreset { label: "XL", size: 100.0 },
];

/// Brush/eraser configuration for one editing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    tool: Tool,
    brush_size: f32,
    brush_color: Rgb,
    opacity: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            brush_size: DEFAULT_BRUSH_SIZE,
            brush_color: Rgb::WHITE,
            opacity: 1.0,
        }
    }
}

impl ToolSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    /// Set the brush diameter, clamped to the 5-150 px slider range.
    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    pub fn brush_color(&self) -> Rgb {
        self.brush_color
    }

    pub fn set_brush_color(&mut self, color: Rgb) {
        self.brush_color = color;
    }

    /// Set the brush color from a `#rrggbb` string.
    pub fn set_brush_color_hex(&mut self, hex: &str) -> Result<(), ColorParseError> {
        self.brush_color = Rgb::from_hex(hex)?;
        Ok(())
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Paint parameters for the next segment.
    ///
    /// The eraser always erases at full strength, so its style ignores
    /// the configured opacity.
    pub fn segment_style(&self) -> SegmentStyle {
        SegmentStyle {
            tool: self.tool,
            size: self.brush_size,
            color: self.brush_color,
            opacity: match self.tool {
                Tool::Brush => self.opacity,
                Tool::Eraser => 1.0,
            },
        }
    }
}
