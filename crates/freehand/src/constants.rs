/// Minimum distance between stored points at zoom 1.0 (surface units).
pub const MIN_POINT_DISTANCE_BASE: f32 = 2.0;

/// Gaps longer than this are filled with interpolated points.
pub const MAX_POINT_DISTANCE: f32 = 15.0;

/// Blend factor of the three-point smoothing kernel.
pub const SMOOTHING_STRENGTH: f32 = 0.5;

/// Smoothing passes applied to a rendered segment.
pub const SMOOTHING_PASSES: usize = 2;

/// Exponential decay of the simulated pressure.
pub const PRESSURE_DECAY: f32 = 0.95;

/// Lower bound of the simulated pressure.
pub const MIN_PRESSURE: f32 = 0.3;

/// Assumed time delta for the first sample of a stroke (milliseconds).
pub const BATCH_UPDATE_INTERVAL_MS: i64 = 16;

/// Points a render pass reaches back past the last-rendered index.
pub const SEGMENT_OVERLAP: usize = 3;

/// Unrendered points required to trigger an incremental render pass.
pub const RENDER_BATCH_THRESHOLD: usize = 3;

/// Tolerance for flattening segment paths into polylines (pixels).
pub const PATH_TOLERANCE: f64 = 0.25;
