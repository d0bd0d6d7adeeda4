//! Raster mask surface - the RGBA8 buffer strokes paint into.
//!
//! The alpha channel encodes masked-ness: painted pixels carry non-zero
//! alpha, erased pixels are fully transparent. Line paint is capsule
//! rasterization (per-pixel distance to the segment), which gives round
//! caps and round joins without any path machinery.

use image::RgbaImage;
use tracing::debug;

use crate::constants::MIN_SEGMENT_WIDTH;
use crate::types::{Point, Rgb, SegmentStyle, Tool};

/// A fixed-size RGBA8 mask surface.
///
/// One surface is owned exclusively by one editor session and replaced
/// wholesale when a new source image loads.
pub struct MaskSurface {
    width: u32,
    height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pixels: Vec<u8>,
}

impl MaskSurface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Read a pixel; None outside the surface.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Source-over blend of `color` at `alpha` onto (x, y).
    #[inline]
    fn blend_pixel(&mut self, x: u32, y: u32, color: Rgb, alpha: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        let src_alpha = alpha.clamp(0.0, 1.0);
        let inv_src_alpha = 1.0 - src_alpha;
        let dst_alpha = self.pixels[i + 3] as f32 / 255.0;

        for channel in 0..3 {
            let src = color.0[channel] as f32;
            let dst = self.pixels[i + channel] as f32;
            self.pixels[i + channel] = (src * src_alpha + dst * inv_src_alpha).round() as u8;
        }
        let out_alpha = src_alpha + dst_alpha * inv_src_alpha;
        self.pixels[i + 3] = (out_alpha * 255.0).round() as u8;
    }

    /// Destination-out at full strength: the pixel is fully cleared.
    #[inline]
    fn erase_pixel(&mut self, x: u32, y: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.pixels[i..i + 4].fill(0);
    }

    /// Reset the entire buffer to fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Fill the entire buffer opaque with `color`, ignoring existing content.
    pub fn fill_all(&mut self, color: Rgb) {
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel[0] = color.0[0];
            pixel[1] = color.0[1];
            pixel[2] = color.0[2];
            pixel[3] = 255;
        }
    }

    /// Invert the surface in place.
    ///
    /// RGB channels are negated; wherever the inverted RGB is non-zero the
    /// pixel is forced opaque, so previously unpainted (transparent black)
    /// area becomes visible and counts as masked. Alpha of pixels that
    /// invert to pure black is left untouched.
    pub fn invert(&mut self) {
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel[0] = 255 - pixel[0];
            pixel[1] = 255 - pixel[1];
            pixel[2] = 255 - pixel[2];
            if pixel[0] > 0 || pixel[1] > 0 || pixel[2] > 0 {
                pixel[3] = 255;
            }
        }
    }

    /// Paint a round-capped, round-joined line segment.
    ///
    /// Every pixel whose center lies within `size / 2` of the segment is
    /// painted: brush segments source-over blend the style color at the
    /// style opacity, eraser segments clear outright. Returns the affected
    /// bounding box `(x, y, width, height)`, or None when the segment lies
    /// entirely outside the surface.
    pub fn paint_line(
        &mut self,
        from: Point,
        to: Point,
        style: &SegmentStyle,
    ) -> Option<(u32, u32, u32, u32)> {
        let radius = style.size.max(MIN_SEGMENT_WIDTH) / 2.0;
        if style.tool == Tool::Brush && style.opacity <= 0.0 {
            return None;
        }

        let x_min_f = (from.x.min(to.x) - radius).floor();
        let y_min_f = (from.y.min(to.y) - radius).floor();
        let x_max_f = (from.x.max(to.x) + radius).ceil();
        let y_max_f = (from.y.max(to.y) + radius).ceil();

        let x_min = (x_min_f.max(0.0) as u32).min(self.width);
        let y_min = (y_min_f.max(0.0) as u32).min(self.height);
        let x_max = (x_max_f.max(0.0) as u32).min(self.width);
        let y_max = (y_max_f.max(0.0) as u32).min(self.height);
        if x_min >= x_max || y_min >= y_max {
            debug!("paint_line outside surface bounds, skipping");
            return None;
        }

        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length_sq = dx * dx + dy * dy;
        let radius_sq = radius * radius;

        for py in y_min..y_max {
            for px in x_min..x_max {
                // Distance from the pixel center to the segment.
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                let t = if length_sq <= f32::EPSILON {
                    0.0
                } else {
                    (((cx - from.x) * dx + (cy - from.y) * dy) / length_sq).clamp(0.0, 1.0)
                };
                let nearest_x = from.x + t * dx - cx;
                let nearest_y = from.y + t * dy - cy;
                if nearest_x * nearest_x + nearest_y * nearest_y > radius_sq {
                    continue;
                }

                match style.tool {
                    Tool::Brush => self.blend_pixel(px, py, style.color, style.opacity),
                    Tool::Eraser => self.erase_pixel(px, py),
                }
            }
        }

        Some((x_min, y_min, x_max - x_min, y_max - y_min))
    }

    /// Paint a filled disc of diameter `size` at a single point.
    ///
    /// Used for the first point of every stroke so a tap-only stroke still
    /// marks pixels.
    pub fn paint_point(
        &mut self,
        center: Point,
        style: &SegmentStyle,
    ) -> Option<(u32, u32, u32, u32)> {
        self.paint_line(center, center, style)
    }

    /// Copy of the full pixel buffer, for the history manager.
    pub fn snapshot(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Overwrite the surface with a snapshot taken from it earlier.
    ///
    /// Returns false (and leaves the surface untouched) on a size mismatch.
    pub fn restore(&mut self, snapshot: &[u8]) -> bool {
        if snapshot.len() != self.pixels.len() {
            debug!(
                "snapshot size mismatch: {} vs {}, ignoring restore",
                snapshot.len(),
                self.pixels.len()
            );
            return false;
        }
        self.pixels.copy_from_slice(snapshot);
        true
    }

    /// Export the surface as an owned RGBA image.
    pub fn to_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brush(size: f32, color: Rgb, opacity: f32) -> SegmentStyle {
        SegmentStyle {
            tool: Tool::Brush,
            size,
            color,
            opacity,
        }
    }

    fn eraser(size: f32) -> SegmentStyle {
        SegmentStyle {
            tool: Tool::Eraser,
            size,
            color: Rgb::BLACK,
            opacity: 1.0,
        }
    }

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = MaskSurface::new(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(surface.pixel(x, y), Some([0, 0, 0, 0]));
            }
        }
        assert_eq!(surface.pixel(16, 0), None);
    }

    #[test]
    fn test_point_paint_is_a_disc() {
        let mut surface = MaskSurface::new(64, 64);
        surface.paint_point(Point { x: 32.0, y: 32.0 }, &brush(20.0, Rgb::WHITE, 1.0));

        // Center painted.
        assert_eq!(surface.pixel(32, 32).unwrap(), [255, 255, 255, 255]);
        // Inside the radius along the axis.
        assert_eq!(surface.pixel(40, 32).unwrap()[3], 255);
        // Outside the radius on the diagonal (distance ~12.0 > 10).
        assert_eq!(surface.pixel(41, 41).unwrap()[3], 0);
    }

    #[test]
    fn test_line_paint_has_round_caps() {
        let mut surface = MaskSurface::new(64, 64);
        let style = brush(10.0, Rgb::WHITE, 1.0);
        surface.paint_line(
            Point { x: 20.0, y: 32.0 },
            Point { x: 44.0, y: 32.0 },
            &style,
        );

        // Along the spine.
        assert_eq!(surface.pixel(30, 32).unwrap()[3], 255);
        // Cap extends past the endpoint by up to the radius.
        assert_eq!(surface.pixel(47, 32).unwrap()[3], 255);
        // But not past the cap.
        assert_eq!(surface.pixel(50, 32).unwrap()[3], 0);
        // Width is bounded by the radius.
        assert_eq!(surface.pixel(30, 38).unwrap()[3], 0);
    }

    #[test]
    fn test_brush_respects_opacity() {
        let mut surface = MaskSurface::new(8, 8);
        surface.paint_point(Point { x: 4.0, y: 4.0 }, &brush(4.0, Rgb::WHITE, 0.5));
        let pixel = surface.pixel(4, 4).unwrap();
        assert_eq!(pixel[3], 128);
        assert_eq!(pixel[0], 128);
    }

    #[test]
    fn test_eraser_clears_fully() {
        let mut surface = MaskSurface::new(32, 32);
        surface.fill_all(Rgb::WHITE);

        surface.paint_point(Point { x: 16.0, y: 16.0 }, &eraser(10.0));
        assert_eq!(surface.pixel(16, 16).unwrap(), [0, 0, 0, 0]);
        // Outside the eraser radius the fill survives.
        assert_eq!(surface.pixel(2, 2).unwrap(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_paint_outside_bounds_is_noop() {
        let mut surface = MaskSurface::new(16, 16);
        let result = surface.paint_point(Point { x: 100.0, y: 100.0 }, &brush(10.0, Rgb::WHITE, 1.0));
        assert!(result.is_none());
        assert_eq!(surface.snapshot(), vec![0; 16 * 16 * 4]);
    }

    #[test]
    fn test_clear_then_fill_all() {
        let mut surface = MaskSurface::new(8, 8);
        surface.fill_all(Rgb([10, 20, 30]));
        assert_eq!(surface.pixel(3, 3).unwrap(), [10, 20, 30, 255]);

        surface.clear();
        assert_eq!(surface.pixel(3, 3).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_invert_after_fill_white_gives_opaque_black() {
        // White fill: inversion lands on pure black, so alpha
        // is left as the fill set it.
        let mut surface = MaskSurface::new(8, 8);
        surface.fill_all(Rgb::WHITE);
        surface.invert();
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(surface.pixel(x, y).unwrap(), [0, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn test_invert_after_fill_black_gives_opaque_white() {
        // Black fill: non-zero inverted RGB forces alpha opaque.
        let mut surface = MaskSurface::new(8, 8);
        surface.fill_all(Rgb::BLACK);
        surface.invert();
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(surface.pixel(x, y).unwrap(), [255, 255, 255, 255]);
            }
        }
    }

    #[test]
    fn test_invert_makes_blank_surface_masked() {
        // Transparent black inverts to white and must become opaque to
        // count as masked.
        let mut surface = MaskSurface::new(4, 4);
        surface.invert();
        assert_eq!(surface.pixel(0, 0).unwrap(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut surface = MaskSurface::new(16, 16);
        surface.paint_point(Point { x: 8.0, y: 8.0 }, &brush(6.0, Rgb::WHITE, 1.0));
        let snapshot = surface.snapshot();

        surface.clear();
        assert_eq!(surface.pixel(8, 8).unwrap()[3], 0);

        assert!(surface.restore(&snapshot));
        assert_eq!(surface.pixel(8, 8).unwrap()[3], 255);
    }

    #[test]
    fn test_restore_rejects_wrong_size() {
        let mut surface = MaskSurface::new(16, 16);
        assert!(!surface.restore(&[0u8; 4]));
    }

    #[test]
    fn test_to_image_matches_pixels() {
        let mut surface = MaskSurface::new(8, 8);
        surface.paint_point(Point { x: 4.0, y: 4.0 }, &brush(4.0, Rgb([200, 100, 50]), 1.0));
        let image = surface.to_image().unwrap();
        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(image.get_pixel(4, 4).0, surface.pixel(4, 4).unwrap());
    }
}
