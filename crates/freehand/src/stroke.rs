//! Stroke point capture, resampling, and smoothing

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::{
    BATCH_UPDATE_INTERVAL_MS, MAX_POINT_DISTANCE, MIN_PRESSURE, PRESSURE_DECAY, SMOOTHING_STRENGTH,
};

/// One sampled point of a freehand stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    /// Position in surface coordinates
    pub pos: Vec2,
    /// Simulated pressure in [MIN_PRESSURE, 1.0]
    pub pressure: f32,
    /// Capture time in milliseconds
    pub time_ms: i64,
}

/// Point sequence for one press-to-release gesture.
///
/// Raw pointer samples are filtered (over-sampling), gap-filled
/// (under-sampling), and annotated with a speed-derived pressure as they are
/// pushed. The buffer is owned by the capture side and cleared on release or
/// cancellation.
#[derive(Debug, Default)]
pub struct StrokeBuffer {
    points: Vec<StrokePoint>,
    /// Time of the last real input sample (0 = none yet)
    last_time: i64,
}

impl StrokeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&StrokePoint> {
        self.points.last()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.last_time = 0;
    }

    /// Push a raw input sample.
    ///
    /// Samples closer than `min_distance` to the last stored point are
    /// dropped. Gaps longer than [`MAX_POINT_DISTANCE`] are filled with
    /// interpolated points carrying the last known pressure. The first point
    /// of a stroke always has pressure 1.0.
    ///
    /// `time_ms` must be non-decreasing within a stroke. Returns the number
    /// of points appended (0 when the sample was dropped).
    pub fn push(&mut self, pos: Vec2, time_ms: i64, min_distance: f32) -> usize {
        debug_assert!(time_ms >= self.last_time);
        let mut appended = 0;
        if let Some(last) = self.points.last().copied() {
            let distance = last.pos.distance(pos);
            if distance < min_distance {
                trace!("dropped over-sampled point at ({:.1}, {:.1})", pos.x, pos.y);
                return 0;
            }
            if distance > MAX_POINT_DISTANCE {
                let steps = (distance / MAX_POINT_DISTANCE).ceil() as i64;
                for i in 1..steps {
                    let t = i as f32 / steps as f32;
                    let time = self.last_time + ((time_ms - self.last_time) as f32 * t) as i64;
                    self.points.push(StrokePoint {
                        pos: last.pos.lerp(pos, t),
                        pressure: last.pressure,
                        time_ms: time,
                    });
                    appended += 1;
                }
            }
        }
        let time_delta = if self.last_time == 0 {
            BATCH_UPDATE_INTERVAL_MS
        } else {
            (time_ms - self.last_time).max(1)
        };
        let pressure = match self.points.last() {
            None => 1.0,
            Some(last) => {
                let speed = last.pos.distance(pos) / time_delta as f32;
                let target = (1.0 - speed * 0.1).clamp(MIN_PRESSURE, 1.0);
                last.pressure * PRESSURE_DECAY + target * (1.0 - PRESSURE_DECAY)
            }
        };
        self.points.push(StrokePoint {
            pos,
            pressure,
            time_ms,
        });
        self.last_time = time_ms;
        appended + 1
    }
}

/// Apply one pass of the three-point position blend.
///
/// The first two points and the last point stay in place; everything in
/// between moves toward the average of its raw neighbors. Returns the input
/// unchanged for fewer than four points.
pub fn smooth(points: &[StrokePoint]) -> Vec<StrokePoint> {
    if points.len() < 4 {
        return points.to_vec();
    }
    let mut result = Vec::with_capacity(points.len());
    result.push(points[0]);
    result.push(points[1]);
    for i in 2..points.len() - 1 {
        let prev = points[i - 1].pos;
        let curr = points[i].pos;
        let next = points[i + 1].pos;
        let pos = curr * (1.0 - SMOOTHING_STRENGTH) + (prev + next) * (SMOOTHING_STRENGTH / 2.0);
        result.push(StrokePoint { pos, ..points[i] });
    }
    result.push(points[points.len() - 1]);
    result
}
