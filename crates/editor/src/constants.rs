/// Default mask surface edge length (the generation edit resolution).
pub const DEFAULT_SURFACE_SIZE: u32 = 512;

/// Maximum retained history snapshots; the oldest entry is evicted beyond this.
pub const HISTORY_CAP: usize = 50;

/// Smallest selectable brush diameter in pixels.
pub const MIN_BRUSH_SIZE: f32 = 5.0;

/// Largest selectable brush diameter in pixels.
pub const MAX_BRUSH_SIZE: f32 = 150.0;

/// Brush diameter a fresh session starts with.
pub const DEFAULT_BRUSH_SIZE: f32 = 30.0;

/// Narrowest width a segment ever paints at.
pub const MIN_SEGMENT_WIDTH: f32 = 1.0;
