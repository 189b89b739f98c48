//! Depth-buffered, perspective-correct textured triangles
//!
//! Edge functions are evaluated once at the bounding box corner and then
//! stepped by constant increments, so each pixel costs three additions for
//! the coverage test.

use super::color::Pixel;
use super::depth::DepthBuffer;
use super::math::{edge, Vec2};
use super::screen::Framebuffer;
use super::shader::PixelShader;
use super::texture::Texture;
use super::{HEIGHT, WIDTH};

/// Barycentric slack so shared edges do not leave seams from float rounding
const EDGE_EPSILON: f32 = -0.0001;

/// Projected vertex handed over by the mesh projector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DepthVertex {
    /// Screen position
    pub x: f32,
    pub y: f32,
    /// Device depth in (0, 65535); linear in screen space
    pub z: f32,
    /// Texture coordinates (normalized, wrapping)
    pub u: f32,
    pub v: f32,
    /// View-space depth used for perspective correction (must be > 0)
    pub w: f32,
}

impl DepthVertex {
    pub fn new(x: f32, y: f32, z: f32, u: f32, v: f32, w: f32) -> Self {
        Self { x, y, z, u, v, w }
    }

    fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Incremental edge-function walker over a clockwise triangle's bounding box
pub(super) struct EdgeWalker {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
    inv_area: f32,
    /// Edge values (bc, ca, ab) at the first pixel center
    origin: [f32; 3],
    step_x: [f32; 3],
    step_y: [f32; 3],
}

impl EdgeWalker {
    /// `None` for back-facing, degenerate or fully off-screen triangles
    pub(super) fn new(a: Vec2, b: Vec2, c: Vec2) -> Option<Self> {
        let area = edge(a, b, c);
        if area <= 0.0 {
            return None;
        }

        let min_x = (a.x.min(b.x).min(c.x).floor() as i32).max(0);
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i32).min(WIDTH as i32 - 1);
        let min_y = (a.y.min(b.y).min(c.y).floor() as i32).max(0);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i32).min(HEIGHT as i32 - 1);
        if min_x > max_x || min_y > max_y {
            return None;
        }

        let p = Vec2::new(min_x as f32 + 0.5, min_y as f32 + 0.5);
        Some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
            inv_area: 1.0 / area,
            origin: [edge(b, c, p), edge(c, a, p), edge(a, b, p)],
            step_x: [b.y - c.y, c.y - a.y, a.y - b.y],
            step_y: [c.x - b.x, a.x - c.x, b.x - a.x],
        })
    }

    /// Call `f(x, y, [wa, wb, wc])` for every covered on-screen pixel;
    /// weights are normalized barycentric coordinates.
    pub(super) fn walk(&self, mut f: impl FnMut(i32, i32, [f32; 3])) {
        let mut row = self.origin;
        for y in self.min_y..=self.max_y {
            let mut e = row;
            for x in self.min_x..=self.max_x {
                let bary = [e[0] * self.inv_area, e[1] * self.inv_area, e[2] * self.inv_area];
                if bary[0] >= EDGE_EPSILON && bary[1] >= EDGE_EPSILON && bary[2] >= EDGE_EPSILON {
                    f(x, y, bary);
                }
                for i in 0..3 {
                    e[i] += self.step_x[i];
                }
            }
            for i in 0..3 {
                row[i] += self.step_y[i];
            }
        }
    }
}

impl Framebuffer {
    /// Rasterize a textured triangle with depth testing.
    ///
    /// Counter-clockwise (back-facing) triangles are skipped. No near/far
    /// clipping happens here: the projector must drop triangles with any
    /// vertex depth outside (0, 65535).
    pub fn fill_triangle_depth<S: PixelShader>(
        &mut self,
        depth: &mut DepthBuffer,
        texture: &Texture,
        a: &DepthVertex,
        b: &DepthVertex,
        c: &DepthVertex,
        opacity: f32,
        shader: &S,
    ) {
        if !self.is_allocated() {
            return;
        }
        let Some(walker) = EdgeWalker::new(a.pos(), b.pos(), c.pos()) else {
            return;
        };

        let inv_w = [1.0 / a.w, 1.0 / b.w, 1.0 / c.w];
        let u_over_w = [a.u * inv_w[0], b.u * inv_w[1], c.u * inv_w[2]];
        let v_over_w = [a.v * inv_w[0], b.v * inv_w[1], c.v * inv_w[2]];
        let z = [a.z, b.z, c.z];

        walker.walk(|x, y, bary| {
            let index = y as usize * WIDTH + x as usize;

            let pz = bary[0] * z[0] + bary[1] * z[1] + bary[2] * z[2];
            let pz = pz.round().clamp(0.0, u16::MAX as f32) as u16;
            if !depth.passes(index, pz) {
                return;
            }

            let w = bary[0] * inv_w[0] + bary[1] * inv_w[1] + bary[2] * inv_w[2];
            let u = (bary[0] * u_over_w[0] + bary[1] * u_over_w[1] + bary[2] * u_over_w[2]) / w;
            let v = (bary[0] * v_over_w[0] + bary[1] * v_over_w[1] + bary[2] * v_over_w[2]) / w;

            let (color, alpha) = texture.sample(u, v);
            if alpha <= 0.0 {
                return;
            }

            let dst: &mut Pixel = &mut self.pixels[index];
            *dst = shader.execute(*dst, color, opacity * alpha);
            depth.set(index, pz);
        });
    }
}
