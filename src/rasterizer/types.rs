//! Small geometry types passed into draw calls

use super::{HEIGHT, WIDTH};

/// Screen-space clip rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Viewport {
    /// The whole screen
    pub const SCREEN: Viewport = Viewport { x: 0, y: 0, w: WIDTH as i32, h: HEIGHT as i32 };

    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Intersect with the screen so callers can index without further checks.
    /// An empty intersection yields a zero-sized viewport.
    pub fn clipped_to_screen(&self) -> Viewport {
        let x = self.x.max(0);
        let y = self.y.max(0);
        let right = self.right().min(WIDTH as i32);
        let bottom = self.bottom().min(HEIGHT as i32);
        Viewport {
            x,
            y,
            w: (right - x).max(0),
            h: (bottom - y).max(0),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::SCREEN
    }
}

/// Resolved screen-space placement of a sprite or rect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Center on screen
    pub x: f32,
    pub y: f32,
    /// Radians, clockwise on screen
    pub rotation: f32,
    /// Must be non-zero
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Transform {
    /// Unrotated, unscaled placement centered at (x, y)
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, rotation: 0.0, scale_x: 1.0, scale_y: 1.0 }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale_x: f32, scale_y: f32) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }
}

/// Axis-aligned region of a texture, in texels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl SourceRect {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_clipping() {
        let v = Viewport::new(-10, 100, 50, 50).clipped_to_screen();
        assert_eq!(v, Viewport::new(0, 100, 40, 28));
    }

    #[test]
    fn test_viewport_fully_offscreen_is_empty() {
        let v = Viewport::new(200, 200, 10, 10).clipped_to_screen();
        assert_eq!(v.w, 0);
        assert_eq!(v.h, 0);
    }
}
