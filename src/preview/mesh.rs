//! Minimal 3D path for the preview: a textured cube projected into
//! depth vertices and pushed through the triangle rasterizer.

use std::ops::{Add, Mul};

use pocket_raster::{DepthBuffer, DepthVertex, Framebuffer, PixelShader, Texture, Vec2};

/// View-space depth range mapped onto the 16-bit depth buffer
const NEAR: f32 = 0.5;
const FAR: f32 = 20.0;
/// Focal length in pixels (90 degree horizontal FOV on a 128px screen)
const FOCAL: f32 = 64.0;

/// 3D vector in view space (x right, y up, z into the screen)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotate around the X axis
    pub fn rotate_x(self, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3 {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    /// Rotate around the Y axis
    pub fn rotate_y(self, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3 {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Cube face: outward normal plus in-plane axes with `u x v = normal`,
/// which makes the face wind clockwise on screen when seen from outside.
struct Face {
    normal: Vec3,
    u: Vec3,
    v: Vec3,
}

const FACES: [Face; 6] = [
    Face { normal: Vec3::new(1.0, 0.0, 0.0), u: Vec3::new(0.0, 1.0, 0.0), v: Vec3::new(0.0, 0.0, 1.0) },
    Face { normal: Vec3::new(-1.0, 0.0, 0.0), u: Vec3::new(0.0, 0.0, 1.0), v: Vec3::new(0.0, 1.0, 0.0) },
    Face { normal: Vec3::new(0.0, 1.0, 0.0), u: Vec3::new(0.0, 0.0, 1.0), v: Vec3::new(1.0, 0.0, 0.0) },
    Face { normal: Vec3::new(0.0, -1.0, 0.0), u: Vec3::new(1.0, 0.0, 0.0), v: Vec3::new(0.0, 0.0, 1.0) },
    Face { normal: Vec3::new(0.0, 0.0, 1.0), u: Vec3::new(1.0, 0.0, 0.0), v: Vec3::new(0.0, 1.0, 0.0) },
    Face { normal: Vec3::new(0.0, 0.0, -1.0), u: Vec3::new(1.0, 0.0, 0.0), v: Vec3::new(0.0, -1.0, 0.0) },
];

/// Quad corners in face space, with their texture coordinates
const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
const UVS: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Project a view-space point to a depth vertex centered on `origin`.
/// `None` when the point lies outside the near/far range.
pub fn project(p: Vec3, origin: Vec2, u: f32, v: f32) -> Option<DepthVertex> {
    if p.z <= NEAR || p.z >= FAR {
        return None;
    }
    let x = origin.x + FOCAL * p.x / p.z;
    let y = origin.y - FOCAL * p.y / p.z;
    let depth = (p.z - NEAR) / (FAR - NEAR) * u16::MAX as f32;
    Some(DepthVertex::new(x, y, depth, u, v, p.z))
}

/// Textured cube placed in view space
#[derive(Debug, Clone, Copy)]
pub struct Cube {
    pub position: Vec3,
    pub half_size: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Cube {
    pub fn new(position: Vec3, half_size: f32) -> Self {
        Self { position, half_size, yaw: 0.0, pitch: 0.0 }
    }

    fn to_view(&self, local: Vec3) -> Vec3 {
        (local * self.half_size).rotate_x(self.pitch).rotate_y(self.yaw) + self.position
    }

    /// Draw every face; back faces are culled by the rasterizer and faces
    /// crossing the near or far plane are dropped whole.
    #[allow(clippy::too_many_arguments)]
    pub fn draw<S: PixelShader>(
        &self,
        fb: &mut Framebuffer,
        depth: &mut DepthBuffer,
        texture: &Texture,
        origin: Vec2,
        opacity: f32,
        shader: &S,
    ) {
        for face in &FACES {
            let quad: Option<Vec<DepthVertex>> = CORNERS
                .iter()
                .zip(UVS)
                .map(|(&(s, t), (u, v))| {
                    let local = face.normal + face.u * s + face.v * t;
                    project(self.to_view(local), origin, u, v)
                })
                .collect();
            let Some(quad) = quad else {
                continue;
            };

            fb.fill_triangle_depth(depth, texture, &quad[0], &quad[1], &quad[2], opacity, shader);
            fb.fill_triangle_depth(depth, texture, &quad[0], &quad[2], &quad[3], opacity, shader);
        }
    }
}
