//! Pocket Raster: software rasterizer for a 128x128 RGB565 handheld screen
//!
//! Everything draws into one of two double-buffered framebuffers:
//! - Pixel, line, circle, rect and flat triangle primitives
//! - Shear-decomposed rotate+scale sprite blits (no per-pixel trig)
//! - Depth-buffered, perspective-correct textured triangles
//! - Bitmap font text laid out on top of the blitter
//!
//! Scene graphs, physics, asset formats and input belong to the caller.

pub mod config;
pub mod error;
pub mod logging;
pub mod rasterizer;

pub use config::RenderConfig;
pub use error::EngineError;
pub use rasterizer::*;
