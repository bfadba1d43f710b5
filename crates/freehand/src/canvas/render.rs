//! Incremental stroke rendering and content grab

use glam::Vec2;
use tracing::trace;

use crate::constants::{SEGMENT_OVERLAP, SMOOTHING_PASSES};
use crate::events::CanvasEvent;
use crate::raster;
use crate::stroke;

use super::Canvas;

impl Canvas {
    /// Render the stroke points gathered since the last pass.
    ///
    /// The pass reaches [`SEGMENT_OVERLAP`] points behind the last-rendered
    /// index so new geometry joins the previous pass without a seam, then
    /// leaves the same number of points unrendered as the anchor for the
    /// next pass. Smoothing runs on the local segment copy only; the raw
    /// stroke buffer is never modified.
    pub(crate) fn render_incremental(&mut self) {
        if self.stroke.is_empty() || self.surface.is_empty() {
            return;
        }
        let start = self.last_rendered.saturating_sub(SEGMENT_OVERLAP);
        let mut segment = self.stroke.points()[start..].to_vec();
        if segment.len() >= 4 {
            for _ in 0..SMOOTHING_PASSES {
                segment = stroke::smooth(&segment);
            }
        }
        trace!(
            "render segment of {} points starting at {}",
            segment.len(),
            start
        );
        if let Some(region) = raster::render_segment(&mut self.surface, &segment, &self.stroke_brush)
        {
            self.dirty_rect = Some(match self.dirty_rect {
                Some(dirty) => dirty.union(region),
                None => region,
            });
        }
        self.last_rendered = self.stroke.len().saturating_sub(SEGMENT_OVERLAP);
    }

    /// Queue a repaint for the accumulated dirty region and reset it
    pub(crate) fn flush_repaint(&mut self) {
        if let Some(region) = self.dirty_rect.take() {
            self.events.push(CanvasEvent::RepaintRequested { region });
        }
    }

    /// Emit the finished-stroke content: the surface cropped to the content
    /// rectangle, together with the rectangle's top-left as origin
    pub(crate) fn grab_content(&mut self) {
        let Some(rect) = self.content_rect else {
            return;
        };
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let pixels = self.surface.copy_region(rect);
        self.events.push(CanvasEvent::StrokeFinished {
            pixels,
            origin: Vec2::new(rect.x0 as f32, rect.y0 as f32),
        });
    }
}
