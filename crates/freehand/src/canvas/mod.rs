//! Freehand drawing canvas
//!
//! This module connects the pieces of the engine:
//! - Pointer input comes in via `begin_stroke`, `add_point`, `end_stroke`,
//!   and `cancel_stroke`
//! - The stroke buffer resamples input and simulates pressure
//! - The rasterizer paints smoothed segments onto the surface
//! - Content and repaint rectangles are tracked per stroke
//! - Output is queued as [`CanvasEvent`]s and drained by the host

mod input;
mod render;

use glam::Vec2;
use kurbo::Rect;

use crate::brush::Brush;
use crate::constants::MIN_POINT_DISTANCE_BASE;
use crate::events::CanvasEvent;
use crate::stroke::StrokeBuffer;
use crate::surface::Surface;

/// Incremental freehand ink canvas.
///
/// One canvas owns one raster surface and at most one stroke in progress.
/// All operations run synchronously on the caller's thread; nothing here
/// fails, degenerate input just produces empty output.
pub struct Canvas {
    pub(crate) surface: Surface,
    logical_width: u32,
    logical_height: u32,
    scale: f32,
    /// Brush for the next stroke
    brush: Brush,
    /// Brush captured at stroke begin; `set_brush` during a stroke does not
    /// retouch in-progress ink
    pub(crate) stroke_brush: Brush,
    pub(crate) stroke: StrokeBuffer,
    pub(crate) drawing: bool,
    /// Index up to which the stroke has been rasterized
    pub(crate) last_rendered: usize,
    zoom: f32,
    /// Bounding box of all ink in the current stroke, grown monotonically
    pub(crate) content_rect: Option<Rect>,
    /// Region to repaint, accumulated per render pass
    pub(crate) dirty_rect: Option<Rect>,
    pub(crate) events: Vec<CanvasEvent>,
}

impl Canvas {
    /// Create a canvas with a surface of the given logical size
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_scale(width, height, 1.0)
    }

    /// Create a canvas whose backing surface is allocated at `scale` times
    /// the logical size (the host's device pixel ratio)
    pub fn with_scale(width: u32, height: u32, scale: f32) -> Self {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        let brush = Brush::default();
        Self {
            surface: Surface::new(width, height, scale),
            logical_width: width,
            logical_height: height,
            scale,
            brush,
            stroke_brush: brush,
            stroke: StrokeBuffer::new(),
            drawing: false,
            last_rendered: 0,
            zoom: 1.0,
            content_rect: None,
            dirty_rect: None,
            events: Vec::new(),
        }
    }

    /// Resize the drawing surface, dropping any stroke in progress.
    ///
    /// With a zero-size surface every stroke operation is a no-op until a
    /// valid size is set.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.drawing {
            self.cancel_stroke();
        }
        self.logical_width = width;
        self.logical_height = height;
        self.surface = Surface::new(width, height, self.scale);
        self.content_rect = None;
        self.dirty_rect = None;
    }

    /// Set the brush used by subsequent strokes
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Zoom factor of the host view; zooming out loosens the over-sampling
    /// filter, zooming in never tightens it past the base threshold
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Points stored for the stroke in progress
    pub fn point_count(&self) -> usize {
        self.stroke.len()
    }

    /// Bounding box of the current stroke's ink, margins included
    pub fn content_rect(&self) -> Option<Rect> {
        self.content_rect
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Drain queued output events
    pub fn take_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn min_point_distance(&self) -> f32 {
        MIN_POINT_DISTANCE_BASE * self.zoom.min(1.0)
    }

    /// Logical surface bounds
    pub(crate) fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.logical_width as f64,
            self.logical_height as f64,
        )
    }

    /// Grow the content rectangle to cover `pos` plus the brush margin.
    ///
    /// Growth is monotonic and clamped to the surface bounds; the rectangle
    /// never shrinks until the stroke ends or is cancelled.
    pub(crate) fn grow_content_rect(&mut self, pos: Vec2) {
        let Some(current) = self.content_rect else {
            return;
        };
        let margin = self.stroke_brush.margin() as f64;
        let bounds = self.bounds();
        let x = pos.x as f64;
        let y = pos.y as f64;
        self.content_rect = Some(Rect::new(
            current.x0.min((x - margin).max(bounds.x0)),
            current.y0.min((y - margin).max(bounds.y0)),
            current.x1.max((x + margin).min(bounds.x1)),
            current.y1.max((y + margin).min(bounds.y1)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_creation() {
        let canvas = Canvas::new(256, 128);
        assert_eq!(canvas.surface().width(), 256);
        assert_eq!(canvas.surface().height(), 128);
        assert!(!canvas.is_drawing());
        assert_eq!(canvas.content_rect(), None);
    }

    #[test]
    fn test_with_scale_allocates_scaled_surface() {
        let canvas = Canvas::with_scale(100, 100, 2.0);
        assert_eq!(canvas.surface().width(), 200);
        assert_eq!(canvas.surface().height(), 200);
    }

    #[test]
    fn test_min_point_distance_follows_zoom() {
        let mut canvas = Canvas::new(100, 100);
        assert_eq!(canvas.min_point_distance(), MIN_POINT_DISTANCE_BASE);
        canvas.set_zoom(0.5);
        assert_eq!(canvas.min_point_distance(), MIN_POINT_DISTANCE_BASE * 0.5);
        // Zooming in does not tighten past the base threshold
        canvas.set_zoom(3.0);
        assert_eq!(canvas.min_point_distance(), MIN_POINT_DISTANCE_BASE);
    }

    #[test]
    fn test_resize_drops_stroke() {
        let mut canvas = Canvas::new(100, 100);
        canvas.begin_stroke(Vec2::new(50.0, 50.0), 0);
        canvas.add_point(Vec2::new(60.0, 50.0), 16);
        canvas.resize(128, 128);
        assert!(!canvas.is_drawing());
        assert_eq!(canvas.point_count(), 0);
        assert_eq!(canvas.content_rect(), None);
        assert_eq!(canvas.surface().width(), 128);
    }

    #[test]
    fn test_set_brush_applies_to_next_stroke() {
        let mut canvas = Canvas::new(100, 100);
        canvas.begin_stroke(Vec2::new(50.0, 50.0), 0);
        // Changing the brush mid-stroke must not affect the captured one
        canvas.set_brush(Brush::new([1.0, 0.0, 0.0, 1.0], 30.0));
        assert_eq!(canvas.stroke_brush.size, 10.0);
        canvas.end_stroke();
        canvas.begin_stroke(Vec2::new(50.0, 50.0), 100);
        assert_eq!(canvas.stroke_brush.size, 30.0);
    }
}
