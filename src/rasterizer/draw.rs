//! Flat-color primitives: fill, pixel, line, circles, triangle

use super::color::Pixel;
use super::math::{edge, Vec2};
use super::screen::Framebuffer;
use super::shader::PixelShader;
use super::triangle::EdgeWalker;
use super::types::Viewport;
use super::{HEIGHT, WIDTH};

impl Framebuffer {
    /// Set every pixel
    pub fn fill(&mut self, color: Pixel) {
        self.pixels.fill(color);
    }

    /// Blend one pixel; anything off-screen is ignored
    #[inline]
    pub fn pixel<S: PixelShader>(&mut self, color: Pixel, x: i32, y: i32, opacity: f32, shader: &S) {
        if !Viewport::SCREEN.contains(x, y) {
            return;
        }
        if let Some(dst) = self.pixels.get_mut(y as usize * WIDTH + x as usize) {
            *dst = shader.execute(*dst, color, opacity);
        }
    }

    /// Blend one pixel without the screen-bounds check.
    /// Callers clip first; out-of-range coordinates wrap rows or panic.
    #[inline]
    pub fn pixel_unchecked<S: PixelShader>(&mut self, color: Pixel, x: i32, y: i32, opacity: f32, shader: &S) {
        debug_assert!(Viewport::SCREEN.contains(x, y));
        let dst = &mut self.pixels[y as usize * WIDTH + x as usize];
        *dst = shader.execute(*dst, color, opacity);
    }

    /// DDA line, both endpoints included
    #[allow(clippy::too_many_arguments)]
    pub fn line<S: PixelShader>(
        &mut self,
        color: Pixel,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        opacity: f32,
        shader: &S,
    ) {
        self.dda(color, x0 as i64, y0 as i64, x1 as i64, y1 as i64, opacity, shader);
    }

    /// DDA over i64 endpoints. Only the steps that can land on screen are
    /// walked, so cost follows the visible length.
    #[allow(clippy::too_many_arguments)]
    fn dda<S: PixelShader>(
        &mut self,
        color: Pixel,
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        opacity: f32,
        shader: &S,
    ) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs());

        if steps == 0 {
            if let (Ok(x), Ok(y)) = (i32::try_from(x0), i32::try_from(y0)) {
                self.pixel(color, x, y, opacity, shader);
            }
            return;
        }

        let x_inc = dx as f64 / steps as f64;
        let y_inc = dy as f64 / steps as f64;

        let Some((t_x0, t_x1)) = visible_steps(x0 as f64, x_inc, WIDTH) else {
            return;
        };
        let Some((t_y0, t_y1)) = visible_steps(y0 as f64, y_inc, HEIGHT) else {
            return;
        };
        // One step of slack either side; `pixel` drops the rounding misses
        let first = (t_x0.max(t_y0).floor() as i64).saturating_sub(1).max(0);
        let last = (t_x1.min(t_y1).ceil() as i64).saturating_add(1).min(steps);

        for t in first..=last {
            let x = (x0 as f64 + t as f64 * x_inc).round();
            let y = (y0 as f64 + t as f64 * y_inc).round();
            self.pixel(color, x as i32, y as i32, opacity, shader);
        }
    }

    /// Filled circle drawn as vertical spans, clipped to the screen
    pub fn filled_circle<S: PixelShader>(
        &mut self,
        color: Pixel,
        cx: i32,
        cy: i32,
        radius: i32,
        opacity: f32,
        shader: &S,
    ) {
        if radius < 0 || !self.is_allocated() {
            return;
        }
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        let r_sq = (r * r) as f64;

        let dx_min = (-r).max(-cx);
        let dx_max = r.min(WIDTH as i64 - 1 - cx);
        for dx in dx_min..=dx_max {
            let half = (r_sq - (dx * dx) as f64).sqrt() as i64;
            let dy_min = (-half).max(-cy);
            let dy_max = half.min(HEIGHT as i64 - 1 - cy);
            for dy in dy_min..=dy_max {
                self.pixel_unchecked(color, (cx + dx) as i32, (cy + dy) as i32, opacity, shader);
            }
        }
    }

    /// Circle outline.
    ///
    /// Walks one octant in angle steps of `2*acos(1 - 1/r)`, the largest step
    /// whose chord stays within a pixel of the arc, and joins consecutive
    /// points with lines mirrored into all four quadrants. Not an exact
    /// midpoint circle, but cheap at the small radii a 128px screen uses.
    pub fn outline_circle<S: PixelShader>(
        &mut self,
        color: Pixel,
        cx: i32,
        cy: i32,
        radius: i32,
        opacity: f32,
        shader: &S,
    ) {
        if radius < 0 {
            return;
        }
        if radius == 0 {
            self.pixel(color, cx, cy, opacity, shader);
            return;
        }

        let r = radius as f32;
        let step = 2.0 * (1.0 - 1.0 / r).acos();
        let end = std::f32::consts::FRAC_PI_4;

        let (cx, cy) = (cx as i64, cy as i64);
        let point = |theta: f32| ((r * theta.cos()).round() as i64, (r * theta.sin()).round() as i64);

        let mut prev = point(0.0);
        let mut theta = 0.0f32;
        while theta < end {
            theta = (theta + step).min(end);
            let next = point(theta);

            let (x0, y0) = prev;
            let (x1, y1) = next;
            for (sx, sy) in [(1, 1), (-1, 1), (1, -1), (-1, -1)] {
                self.dda(color, cx + sx * x0, cy + sy * y0, cx + sx * x1, cy + sy * y1, opacity, shader);
                self.dda(color, cx + sx * y0, cy + sy * x0, cx + sx * y1, cy + sy * x1, opacity, shader);
            }

            prev = next;
        }
    }

    /// Flat-color triangle. Either winding is drawn; degenerate triangles are not.
    pub fn filled_triangle<S: PixelShader>(
        &mut self,
        color: Pixel,
        a: Vec2,
        b: Vec2,
        c: Vec2,
        opacity: f32,
        shader: &S,
    ) {
        // 2D shapes have no back side, so flip counter-clockwise input
        let (b, c) = if edge(a, b, c) < 0.0 { (c, b) } else { (b, c) };

        if !self.is_allocated() {
            return;
        }
        let Some(walker) = EdgeWalker::new(a, b, c) else {
            return;
        };

        walker.walk(|x, y, _bary| {
            self.pixel_unchecked(color, x, y, opacity, shader);
        });
    }
}

/// Range of DDA parameters `t` for which `start + t * inc` rounds into
/// `0..len`, or `None` when the line never crosses that span.
fn visible_steps(start: f64, inc: f64, len: usize) -> Option<(f64, f64)> {
    let lo = -0.5;
    let hi = len as f64 - 0.5;
    if inc == 0.0 {
        return (lo..hi).contains(&start).then_some((f64::NEG_INFINITY, f64::INFINITY));
    }
    let a = (lo - start) / inc;
    let b = (hi - start) / inc;
    Some((a.min(b), a.max(b)))
}
