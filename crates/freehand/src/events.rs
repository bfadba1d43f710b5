//! Output events queued by the canvas for its host

use glam::Vec2;
use kurbo::Rect;

use crate::surface::PixelBuffer;

/// Events the host drains with `Canvas::take_events`.
///
/// The canvas never calls back into the host; it queues these and the host
/// picks them up after feeding input, which keeps the engine free of any
/// toolkit coupling.
#[derive(Debug, Clone)]
pub enum CanvasEvent {
    /// A stroke finished with non-empty content.
    ///
    /// `origin` is the top-left of the cropped pixels in surface
    /// coordinates; it can be negative when the brush margin hangs past the
    /// surface edge.
    StrokeFinished { pixels: PixelBuffer, origin: Vec2 },
    /// A region of the surface changed and the host view should repaint it
    RepaintRequested { region: Rect },
}
