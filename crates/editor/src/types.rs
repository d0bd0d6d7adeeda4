//! Core types for the mask editor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Active painting tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Paint mask pixels (source-over with the brush color).
    #[default]
    Brush,
    /// Remove mask pixels (destination-out, always at full strength).
    Eraser,
}

/// A point in raster (surface-pixel) coordinates, not screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// RGB brush color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    /// Parse a `#rrggbb` (or bare `rrggbb`) hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError(hex.to_owned()));
        }
        let parse = |range| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError(hex.to_owned()))
        };
        Ok(Rgb([parse(0..2)?, parse(2..4)?, parse(4..6)?]))
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// Failed to parse a hex color string.
#[derive(Debug, Error)]
#[error("invalid hex color: {0}")]
pub struct ColorParseError(pub String);

/// Paint parameters for one stroke segment, sampled at paint time.
///
/// Changing a tool setting mid-stroke takes effect on the next segment
/// because the editor re-samples these per event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub tool: Tool,
    /// Stroke width (brush diameter) in pixels.
    pub size: f32,
    /// Ignored by the eraser.
    pub color: Rgb,
    /// Forced to 1.0 for the eraser.
    pub opacity: f32,
}

/// One point of a multi-touch event, in client (screen) coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// Keyboard modifier keys state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Keyboard input event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardEvent {
    pub key: String,
    pub pressed: bool,
    pub modifiers: Modifiers,
}

/// Commands routed to the editor controller, from UI buttons or hotkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorCommand {
    Undo,
    Redo,
    Clear,
    Invert,
    FillAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex("#ffffff").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("000000").unwrap(), Rgb::BLACK);
        assert_eq!(Rgb::from_hex("#1A2b3C").unwrap(), Rgb([0x1a, 0x2b, 0x3c]));
    }

    #[test]
    fn test_rgb_from_hex_rejects_malformed() {
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gggggg").is_err());
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#ffffff00").is_err());
    }

    #[test]
    fn test_rgb_hex_round_trip() {
        let color = Rgb([18, 52, 86]);
        assert_eq!(Rgb::from_hex(&color.to_hex()).unwrap(), color);
    }
}
