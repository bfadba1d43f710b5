//! Freehand ink engine - incremental stroke capture and rasterization
//!
//! This crate provides the drawing core of an image annotation editor:
//! - [`canvas`] - press/move/release entry points and event output
//! - [`stroke`] - stroke points, resampling, pressure simulation, smoothing
//! - [`raster`] - segment path building and stamping
//! - [`surface`] - per-stroke CPU pixel surface and cropped read-out
//! - [`brush`] - brush configuration
//! - [`events`] - host-facing output events
//!
//! The engine is single-threaded and toolkit-agnostic: the host feeds
//! pointer samples in and drains [`events::CanvasEvent`]s back out.

pub mod brush;
pub mod canvas;
pub mod constants;
pub mod events;
pub mod raster;
pub mod stroke;
pub mod surface;

pub use brush::*;
pub use canvas::*;
pub use constants::*;
pub use events::*;
pub use raster::*;
pub use stroke::*;
pub use surface::*;
