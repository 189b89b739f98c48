//! Demo content for the preview window
//!
//! - `scene` - What gets drawn each frame
//! - `mesh` - Cube projection into depth vertices
//! - `font` - Built-in 3x5 font

mod font;
mod mesh;
mod scene;

pub use scene::Scene;
