//! Pointer input handling for the canvas

use glam::Vec2;
use kurbo::Rect;
use tracing::debug;

use crate::constants::RENDER_BATCH_THRESHOLD;

use super::Canvas;

impl Canvas {
    /// Start a stroke at `pos`.
    ///
    /// A stroke still in progress is cancelled first. The current brush is
    /// captured for the whole stroke; the content rectangle starts as the
    /// brush margin box around `pos`.
    pub fn begin_stroke(&mut self, pos: Vec2, time_ms: i64) {
        if self.drawing {
            self.cancel_stroke();
        }
        if self.surface.is_empty() {
            return;
        }
        self.stroke_brush = self.brush();
        self.stroke.clear();
        self.last_rendered = 0;
        self.dirty_rect = None;
        self.stroke.push(pos, time_ms, self.min_point_distance());
        let margin = self.stroke_brush.margin() as f64;
        let anchor = kurbo::Point::new(pos.x as f64, pos.y as f64);
        self.content_rect = Some(Rect::from_points(anchor, anchor).inflate(margin, margin));
        self.drawing = true;
        debug!("begin stroke at ({:.1}, {:.1})", pos.x, pos.y);
    }

    /// Feed a pointer-move sample.
    ///
    /// Ignored outside a stroke. Once enough unrendered points accumulate,
    /// an incremental render pass runs and a repaint request is queued.
    pub fn add_point(&mut self, pos: Vec2, time_ms: i64) {
        if !self.drawing || self.surface.is_empty() {
            return;
        }
        let appended = self.stroke.push(pos, time_ms, self.min_point_distance());
        if appended == 0 {
            return;
        }
        self.grow_content_rect(pos);
        if self.stroke.len() - self.last_rendered >= RENDER_BATCH_THRESHOLD {
            self.render_incremental();
            self.flush_repaint();
        }
    }

    /// Finish the stroke.
    ///
    /// Renders the unrendered tail, emits the finished-stroke content when
    /// the content rectangle is non-empty, then clears all stroke state and
    /// the surface.
    pub fn end_stroke(&mut self) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        self.render_incremental();
        self.flush_repaint();
        self.grab_content();
        debug!("end stroke, {} points", self.stroke.len());
        self.reset_stroke_state();
    }

    /// Discard the stroke without emitting content
    pub fn cancel_stroke(&mut self) {
        self.drawing = false;
        self.dirty_rect = None;
        debug!("cancel stroke, {} points discarded", self.stroke.len());
        self.reset_stroke_state();
    }

    /// Clear per-stroke state and the surface, and ask the host to repaint
    /// whatever preview it was showing
    fn reset_stroke_state(&mut self) {
        self.stroke.clear();
        self.last_rendered = 0;
        self.content_rect = None;
        if !self.surface.is_empty() {
            self.surface.clear();
            let bounds = self.bounds();
            self.events
                .push(crate::events::CanvasEvent::RepaintRequested { region: bounds });
        }
    }
}
