//! Brush configuration for stroke rendering

use serde::{Deserialize, Serialize};

/// Brush used for freehand ink.
///
/// The brush is captured when a stroke begins; changing it while a stroke is
/// in progress affects the next stroke only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    /// Straight RGBA color, each channel 0.0-1.0
    pub color: [f32; 4],
    /// Base diameter in surface units
    pub size: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 1.0],
            size: 10.0,
        }
    }
}

impl Brush {
    /// Create a brush with the given color and size
    pub fn new(color: [f32; 4], size: f32) -> Self {
        Self {
            color: color.map(|c| c.clamp(0.0, 1.0)),
            size: size.max(0.01), // Prevent degenerate brushes
        }
    }

    /// Distance the brush can reach past a stroke point, per side
    #[inline]
    pub fn margin(&self) -> f32 {
        self.size
    }

    /// Stroke width for a segment with the given average pressure
    #[inline]
    pub fn width_for_pressure(&self, pressure: f32) -> f32 {
        self.size * pressure.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_default() {
        let brush = Brush::default();
        assert_eq!(brush.color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(brush.size, 10.0);
    }

    #[test]
    fn test_brush_new_clamps() {
        let brush = Brush::new([2.0, -1.0, 0.5, 1.5], -3.0);
        assert_eq!(brush.color, [1.0, 0.0, 0.5, 1.0]);
        assert!(brush.size > 0.0);
    }

    #[test]
    fn test_width_for_pressure() {
        let brush = Brush::new([0.0, 0.0, 0.0, 1.0], 20.0);
        assert!((brush.width_for_pressure(1.0) - 20.0).abs() < 0.001);
        assert!((brush.width_for_pressure(0.5) - 10.0).abs() < 0.001);
        // Out-of-range pressure is clamped
        assert!((brush.width_for_pressure(2.0) - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_margin_matches_size() {
        let brush = Brush::new([0.0, 0.0, 0.0, 1.0], 12.0);
        assert_eq!(brush.margin(), 12.0);
    }
}
