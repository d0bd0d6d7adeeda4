//! Stroke capture - pointer/touch input to raster-space stroke segments.

use tracing::debug;

use crate::types::{Point, TouchPoint};

/// On-screen placement of the mask surface at the time of one input event.
///
/// The surface may be displayed at a different size than its backing
/// buffer, so client coordinates are scaled by `surface / displayed`.
/// Recomputed per event rather than cached: responsive layouts can change
/// the displayed rect between events.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceViewport {
    pub left: f32,
    pub top: f32,
    /// Displayed width in client pixels.
    pub width: f32,
    /// Displayed height in client pixels.
    pub height: f32,
}

impl SurfaceViewport {
    /// Map client coordinates onto a `surface_width x surface_height`
    /// raster. None when the displayed rect is degenerate.
    pub fn to_surface(
        &self,
        surface_width: u32,
        surface_height: u32,
        client_x: f32,
        client_y: f32,
    ) -> Option<Point> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let scale_x = surface_width as f32 / self.width;
        let scale_y = surface_height as f32 / self.height;
        Some(Point {
            x: (client_x - self.left) * scale_x,
            y: (client_y - self.top) * scale_y,
        })
    }

    /// Map the first point of a multi-touch event; only that point is
    /// honored. None when no touch points remain.
    pub fn touch_to_surface(
        &self,
        surface_width: u32,
        surface_height: u32,
        touches: &[TouchPoint],
    ) -> Option<Point> {
        let first = touches.first()?;
        self.to_surface(surface_width, surface_height, first.client_x, first.client_y)
    }
}

/// Tracks one in-progress stroke between pointer-down and pointer-up.
#[derive(Debug, Default)]
pub struct StrokeCapture {
    last_point: Option<Point>,
    drawing: bool,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Start a stroke at `point`, recording it as the running cursor.
    pub fn begin(&mut self, point: Point) {
        self.drawing = true;
        self.last_point = Some(point);
    }

    /// Advance the stroke, returning the `(from, to)` segment to paint.
    ///
    /// No-op without a preceding [`begin`](Self::begin), which guards
    /// against stray move events.
    pub fn extend(&mut self, point: Point) -> Option<(Point, Point)> {
        if !self.drawing {
            debug!("extend without an active stroke, ignoring");
            return None;
        }
        let from = self.last_point.replace(point)?;
        Some((from, point))
    }

    /// Finish the stroke, clearing the running cursor.
    ///
    /// Returns whether a stroke was actually active; calling `end` again
    /// is a no-op.
    pub fn end(&mut self) -> bool {
        let was_drawing = self.drawing;
        self.drawing = false;
        self.last_point = None;
        was_drawing
    }
}
