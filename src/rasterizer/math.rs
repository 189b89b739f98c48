//! 2D math for screen-space rasterization

use std::ops::{Add, Mul, Neg, Sub};

include!(concat!(env!("OUT_DIR"), "/angle_table.rs"));

/// 2D Vector (screen positions, texture coordinates, basis vectors)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `radians` (clockwise from +x on a y-down screen)
    pub fn from_angle(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { x: cos, y: sin }
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 { x: self.x * s, y: self.y * s }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 { x: self.x - other.x, y: self.y - other.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2 { x: -self.x, y: -self.y }
    }
}

/// Signed double area of (a, b, p).
///
/// Positive when a -> b -> p turns clockwise on a y-down screen.
pub fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Rotation quantized to 1024 steps per full turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Angle(u16);

impl Angle {
    pub const STEPS: i32 = 1024;
    pub const ZERO: Angle = Angle(0);
    pub const QUARTER: Angle = Angle(256);
    pub const HALF: Angle = Angle(512);

    /// Wraps any step count into [0, 1024)
    pub fn new(steps: i32) -> Self {
        Angle(steps.rem_euclid(Self::STEPS) as u16)
    }

    /// Nearest quantized angle
    pub fn from_radians(radians: f32) -> Self {
        let steps = (radians * Self::STEPS as f32 / std::f32::consts::TAU).round() as i32;
        Self::new(steps)
    }

    pub fn to_radians(self) -> f32 {
        self.0 as f32 * std::f32::consts::TAU / Self::STEPS as f32
    }

    /// Table lookup, no trig
    pub fn sin_cos(self) -> (f32, f32) {
        let entry = &ANGLE_TABLE[self.0 as usize];
        (entry[0], entry[1])
    }

    /// Rotate `point` about `pivot` with three shears (x, y, x).
    ///
    /// Angles past a quarter turn are rotated by a half turn first so the
    /// shear factor `-tan(θ/2)` stays within [-1, 1].
    pub fn rotate_about(self, point: Vec2, pivot: Vec2) -> Vec2 {
        let entry = &ANGLE_TABLE[self.0 as usize];
        let (shear_x, shear_y) = (entry[2], entry[3]);

        let mut d = point - pivot;
        if self.0 > 256 && self.0 < 768 {
            d = -d;
        }

        let x1 = d.x + shear_x * d.y;
        let y1 = d.y + shear_y * x1;
        let x2 = x1 + shear_x * y1;

        pivot + Vec2::new(x2, y1)
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, other: Angle) -> Angle {
        Angle::new(self.0 as i32 + other.0 as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn test_angle_wraps() {
        assert_eq!(Angle::new(1024), Angle::ZERO);
        assert_eq!(Angle::new(-256), Angle::new(768));
        assert_eq!(Angle::HALF + Angle::HALF, Angle::ZERO);
    }

    #[test]
    fn test_table_matches_trig() {
        for steps in [0, 1, 100, 256, 300, 512, 700, 768, 1000] {
            let angle = Angle::new(steps);
            let (sin, cos) = angle.sin_cos();
            let (exp_sin, exp_cos) = angle.to_radians().sin_cos();
            assert!((sin - exp_sin).abs() < 1e-5, "sin at {}", steps);
            assert!((cos - exp_cos).abs() < 1e-5, "cos at {}", steps);
        }
    }

    #[test]
    fn test_quadrant_entries_are_exact() {
        assert_eq!(Angle::ZERO.sin_cos(), (0.0, 1.0));
        assert_eq!(Angle::QUARTER.sin_cos(), (1.0, 0.0));
    }

    #[test]
    fn test_shear_rotation_matches_matrix() {
        let pivot = Vec2::new(64.0, 64.0);
        let point = Vec2::new(80.0, 70.0);
        for steps in [0, 37, 256, 400, 512, 640, 768, 900, 1023] {
            let angle = Angle::new(steps);
            let (sin, cos) = angle.to_radians().sin_cos();
            let d = point - pivot;
            let expected = pivot + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
            let got = angle.rotate_about(point, pivot);
            assert!(close(got, expected), "steps {}: {:?} vs {:?}", steps, got, expected);
        }
    }

    #[test]
    fn test_edge_sign_is_clockwise_positive() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(0.0, 10.0);
        assert!(edge(a, b, c) > 0.0);
        assert!(edge(a, c, b) < 0.0);
    }
}
