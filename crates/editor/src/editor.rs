//! Editor controller.
//!
//! Orchestrates stroke capture, the raster surface, and history for one
//! editing session, and emits encoded masks to the external collaborator
//! after every committed change (stroke end, undo, redo, clear, invert,
//! fill-all).
//!
//! Two states: idle and drawing. Pointer/touch down begins a stroke and
//! stamps a dot; each move paints a segment immediately (no batching);
//! up/leave/touch-end snapshots into history and emits. Undo/redo and the
//! mask-wide commands only run while idle.

use std::path::Path;

use image::RgbaImage;
use image::imageops::FilterType;
use overpaint_maskops::codec;
use tracing::{debug, warn};

use crate::capture::{StrokeCapture, SurfaceViewport};
use crate::constants::DEFAULT_SURFACE_SIZE;
use crate::history::History;
use crate::hotkeys;
use crate::loader;
use crate::settings::ToolSettings;
use crate::surface::MaskSurface;
use crate::types::{EditorCommand, KeyboardEvent, Point, TouchPoint};

/// Callback invoked with the encoded mask (a base64 PNG data URI) after
/// every committed state change. The sole channel by which mask data
/// reaches job submission.
pub type MaskChangedCallback = Box<dyn Fn(&str) + Send + Sync>;

/// One mask-editing session.
///
/// Owns its surface, history, and settings exclusively; external
/// components obtain mask data only through the `on_mask_change`
/// emission, never by reaching into the surface.
pub struct MaskEditor {
    surface: MaskSurface,
    history: History,
    capture: StrokeCapture,
    settings: ToolSettings,
    background: Option<RgbaImage>,
    image_loaded: bool,
    on_mask_change: Option<MaskChangedCallback>,
}

impl MaskEditor {
    /// Create a session over a blank `width x height` surface, recording
    /// the blank state as the history baseline.
    pub fn new(width: u32, height: u32, settings: ToolSettings) -> Self {
        let surface = MaskSurface::new(width, height);
        let mut history = History::new();
        history.record(surface.snapshot());
        Self {
            surface,
            history,
            capture: StrokeCapture::new(),
            settings,
            background: None,
            image_loaded: false,
            on_mask_change: None,
        }
    }

    /// Session at the default 512x512 edit resolution.
    pub fn with_default_size(settings: ToolSettings) -> Self {
        Self::new(DEFAULT_SURFACE_SIZE, DEFAULT_SURFACE_SIZE, settings)
    }

    pub fn set_mask_change_callback(&mut self, callback: MaskChangedCallback) {
        self.on_mask_change = Some(callback);
    }

    pub fn clear_mask_change_callback(&mut self) {
        self.on_mask_change = None;
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Settings are sampled per segment, so changes here take effect on
    /// the next painted segment even mid-stroke.
    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn surface(&self) -> &MaskSurface {
        &self.surface
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_drawing()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- pointer input ------------------------------------------------------

    pub fn pointer_down(&mut self, viewport: &SurfaceViewport, client_x: f32, client_y: f32) {
        let Some(point) = self.map_client(viewport, client_x, client_y) else {
            return;
        };
        self.begin_stroke(point);
    }

    pub fn pointer_move(&mut self, viewport: &SurfaceViewport, client_x: f32, client_y: f32) {
        if !self.capture.is_drawing() {
            return;
        }
        let Some(point) = self.map_client(viewport, client_x, client_y) else {
            return;
        };
        self.extend_stroke(point);
    }

    pub fn pointer_up(&mut self) {
        self.finish_stroke();
    }

    /// Leaving the surface ends the stroke like a pointer-up.
    pub fn pointer_leave(&mut self) {
        self.finish_stroke();
    }

    // ---- touch input (first touch point only) -------------------------------

    pub fn touch_start(&mut self, viewport: &SurfaceViewport, touches: &[TouchPoint]) {
        let Some(point) =
            viewport.touch_to_surface(self.surface.width(), self.surface.height(), touches)
        else {
            return;
        };
        self.begin_stroke(point);
    }

    pub fn touch_move(&mut self, viewport: &SurfaceViewport, touches: &[TouchPoint]) {
        if !self.capture.is_drawing() {
            return;
        }
        let Some(point) =
            viewport.touch_to_surface(self.surface.width(), self.surface.height(), touches)
        else {
            return;
        };
        self.extend_stroke(point);
    }

    pub fn touch_end(&mut self) {
        self.finish_stroke();
    }

    fn map_client(
        &self,
        viewport: &SurfaceViewport,
        client_x: f32,
        client_y: f32,
    ) -> Option<Point> {
        viewport.to_surface(self.surface.width(), self.surface.height(), client_x, client_y)
    }

    fn begin_stroke(&mut self, point: Point) {
        self.capture.begin(point);
        let style = self.settings.segment_style();
        self.surface.paint_point(point, &style);
    }

    fn extend_stroke(&mut self, point: Point) {
        let style = self.settings.segment_style();
        if let Some((from, to)) = self.capture.extend(point) {
            self.surface.paint_line(from, to, &style);
        }
    }

    fn finish_stroke(&mut self) {
        if self.capture.end() {
            self.commit();
        }
    }

    // ---- commands -----------------------------------------------------------

    /// Dispatch a command from a UI button or hotkey.
    pub fn apply_command(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::Clear => self.clear(),
            EditorCommand::Invert => self.invert(),
            EditorCommand::FillAll => self.fill_all(),
        }
    }

    /// Route a keyboard event through the shortcut table.
    pub fn handle_key(&mut self, event: &KeyboardEvent) {
        if let Some(command) = hotkeys::command_for_key(event) {
            self.apply_command(command);
        }
    }

    /// Restore the previous history snapshot and re-emit. Navigation only:
    /// no new history entry is recorded. No-op on exhausted history.
    pub fn undo(&mut self) {
        if self.guard_drawing("undo") {
            return;
        }
        let restored = match self.history.undo() {
            Some(snapshot) => self.surface.restore(snapshot),
            None => false,
        };
        if restored {
            self.emit_mask();
        }
    }

    /// Symmetric to [`undo`](Self::undo).
    pub fn redo(&mut self) {
        if self.guard_drawing("redo") {
            return;
        }
        let restored = match self.history.redo() {
            Some(snapshot) => self.surface.restore(snapshot),
            None => false,
        };
        if restored {
            self.emit_mask();
        }
    }

    /// Reset the mask to fully transparent, snapshot, emit.
    pub fn clear(&mut self) {
        if self.guard_drawing("clear") {
            return;
        }
        self.surface.clear();
        self.commit();
    }

    /// Invert the mask in place (live-surface semantics), snapshot, emit.
    pub fn invert(&mut self) {
        if self.guard_drawing("invert") {
            return;
        }
        self.surface.invert();
        self.commit();
    }

    /// Fill the whole mask opaque with the current brush color, snapshot,
    /// emit.
    pub fn fill_all(&mut self) {
        if self.guard_drawing("fill_all") {
            return;
        }
        self.surface.fill_all(self.settings.brush_color());
        self.commit();
    }

    fn guard_drawing(&self, command: &str) -> bool {
        if self.capture.is_drawing() {
            debug!("ignoring {command} mid-stroke");
            return true;
        }
        false
    }

    fn commit(&mut self) {
        self.history.record(self.surface.snapshot());
        self.emit_mask();
    }

    /// Encode the surface and hand it to the collaborator. Encoding
    /// failures log and skip the emission rather than erroring the session.
    fn emit_mask(&self) {
        let Some(callback) = &self.on_mask_change else {
            return;
        };
        let Some(image) = self.surface.to_image() else {
            warn!("mask surface buffer unavailable, skipping emission");
            return;
        };
        match codec::to_data_uri(&image) {
            Ok(encoded) => callback(&encoded),
            Err(e) => warn!("failed to encode mask: {e}"),
        }
    }

    /// Export the current mask without going through the callback.
    pub fn export_mask(&self) -> Option<String> {
        let image = self.surface.to_image()?;
        codec::to_data_uri(&image).ok()
    }

    // ---- source image -------------------------------------------------------

    /// Load a source image into the background layer.
    ///
    /// Returns whether the image loaded; failure leaves the background
    /// blank and the editor usable. Success replaces the mask surface
    /// wholesale (fresh pixels, fresh history baseline).
    pub async fn load_source(&mut self, path: impl AsRef<Path>) -> bool {
        match loader::load_source_image(path).await {
            Ok(image) => {
                self.set_background(image);
                true
            }
            Err(e) => {
                warn!("failed to load source image: {e}");
                self.background = None;
                self.image_loaded = false;
                false
            }
        }
    }

    /// Install an already-decoded source image as the non-interactive
    /// background layer, scaling it to the surface resolution, and start a
    /// fresh mask over it.
    pub fn set_background(&mut self, image: RgbaImage) {
        let (width, height) = (self.surface.width(), self.surface.height());
        let image = if image.dimensions() == (width, height) {
            image
        } else {
            image::imageops::resize(&image, width, height, FilterType::Triangle)
        };
        self.background = Some(image);
        self.image_loaded = true;
        self.reset_mask();
    }

    fn reset_mask(&mut self) {
        self.capture.end();
        self.surface.clear();
        self.history.reset();
        self.history.record(self.surface.snapshot());
    }

    pub fn image_loaded(&self) -> bool {
        self.image_loaded
    }

    pub fn background(&self) -> Option<&RgbaImage> {
        self.background.as_ref()
    }
}
