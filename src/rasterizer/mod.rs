//! 128x128 RGB565 software rasterizer
//!
//! Features:
//! - Double-buffered screen with an explicit swap per frame
//! - Per-pixel shaders (plain write, opacity, tint + opacity)
//! - Shear-based sprite blits: rotation and scale without per-pixel trig
//! - Perspective-correct textured triangles with a 16-bit depth buffer
//! - Bitmap font text built on the blitter
//!
//! # Module Organization
//!
//! - `color` - Pixel (RGB565) packing and channel helpers
//! - `types` - Viewport, Transform, SourceRect
//! - `math` - Vec2, Angle, fixed-point angle table, edge function
//! - `shader` - PixelShader trait and built-in shaders
//! - `texture` - Texture and its pixel formats
//! - `screen` - Framebuffer and the double-buffer manager
//! - `depth` - DepthBuffer
//! - `draw` - Pixel, line, circle and flat triangle primitives
//! - `blit` - Affine sprite blitter and rotated rectangles
//! - `triangle` - Depth-tested perspective triangle rasterizer
//! - `text` - Bitmap fonts and text layout
//! - `render` - Renderer tying screen and depth buffers together

mod blit;
mod color;
mod depth;
mod draw;
mod math;
mod render;
mod screen;
mod shader;
mod text;
mod texture;
mod triangle;
mod types;

pub use blit::Sprite;
pub use color::Pixel;
pub use depth::DepthBuffer;
pub use math::{edge, Angle, Vec2};
pub use render::{Frame, Renderer};
pub use screen::{Framebuffer, ScreenBuffers};
pub use shader::{
    BlendOpacityShader, EmptyShader, OpacityShader, PixelShader, Shader, Tint,
};
pub use text::{BitmapFont, Glyph, TextLayout};
pub use texture::{PixelData, Texture};
pub use triangle::DepthVertex;
pub use types::{SourceRect, Transform, Viewport};

/// Screen dimensions (fixed by the device panel)
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 128;
