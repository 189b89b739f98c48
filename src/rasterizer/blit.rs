//! Affine sprite blitter
//!
//! Rotation + scale is applied by inverse-mapping destination pixels back into
//! the source rectangle. The mapping is the algebraic form of three shears, so
//! after one multiply-add per row each column only adds two constant steps:
//! no per-pixel trig, no per-pixel division.

use super::color::Pixel;
use super::depth::DepthBuffer;
use super::math::{Angle, Vec2};
use super::screen::Framebuffer;
use super::shader::PixelShader;
use super::texture::Texture;
use super::types::{SourceRect, Transform, Viewport};
use super::WIDTH;

/// A texture region to blit, with optional color-key transparency
#[derive(Debug, Clone, Copy)]
pub struct Sprite<'a> {
    pub texture: &'a Texture,
    pub src: SourceRect,
    /// Texels of exactly this color are skipped; `None` disables keying
    pub transparent: Option<Pixel>,
}

impl<'a> Sprite<'a> {
    /// The whole texture, no color key
    pub fn new(texture: &'a Texture) -> Self {
        Self {
            texture,
            src: SourceRect::new(0, 0, texture.width, texture.height),
            transparent: None,
        }
    }

    /// One frame of a sprite sheet
    pub fn with_src(mut self, src: SourceRect) -> Self {
        self.src = src;
        self
    }

    pub fn with_transparent(mut self, key: Pixel) -> Self {
        self.transparent = Some(key);
        self
    }

    #[inline]
    fn fetch(&self, sx: usize, sy: usize) -> (Pixel, f32) {
        self.texture.texel(self.src.x + sx, self.src.y + sy)
    }
}

/// Resolved center, rotation and scale for the inner loop
struct ShearMap {
    cx: f32,
    cy: f32,
    sin: f32,
    cos: f32,
    scale_x: f32,
    scale_y: f32,
}

impl ShearMap {
    fn from_transform(t: &Transform) -> Self {
        let (sin, cos) = t.rotation.sin_cos();
        Self { cx: t.x, cy: t.y, sin, cos, scale_x: t.scale_x, scale_y: t.scale_y }
    }
}

/// Core shear-blit loop shared by sprites and flat rects.
///
/// `fetch` is only called with coordinates inside `src_w x src_h`. When
/// `depth` is given, pixels must be strictly nearer than the stored depth and
/// the depth is written on success.
#[allow(clippy::too_many_arguments)]
fn shear_blit<S: PixelShader>(
    fb: &mut Framebuffer,
    clip: Viewport,
    src_w: usize,
    src_h: usize,
    map: &ShearMap,
    transparent: Option<Pixel>,
    mut depth: Option<(&mut DepthBuffer, u16)>,
    opacity: f32,
    shader: &S,
    fetch: impl Fn(usize, usize) -> (Pixel, f32),
) {
    let clip = clip.clipped_to_screen();
    if clip.w == 0 || clip.h == 0 || src_w == 0 || src_h == 0 || !fb.is_allocated() {
        return;
    }

    let inv_scale_x = 1.0 / map.scale_x;
    let inv_scale_y = 1.0 / map.scale_y;

    let scaled_w = src_w as f32 * map.scale_x;
    let scaled_h = src_h as f32 * map.scale_y;
    let half_w = scaled_w * 0.5;
    let half_h = scaled_h * 0.5;

    // Bounding square that holds the sprite at any rotation. Offsets are i64
    // and saturating so far-off centers and huge scales clip to nothing.
    let dim = (scaled_w * scaled_w + scaled_h * scaled_h).sqrt().ceil() as i64;
    let left = (map.cx - dim as f32 * 0.5).floor() as i64;
    let top = (map.cy - dim as f32 * 0.5).floor() as i64;

    let i_start = (clip.x as i64).saturating_sub(left).max(0);
    let j_start = (clip.y as i64).saturating_sub(top).max(0);
    let i_end = dim.min((clip.right() as i64).saturating_sub(left));
    let j_end = dim.min((clip.bottom() as i64).saturating_sub(top));
    if i_start >= i_end || j_start >= j_end {
        return;
    }

    let (sin, cos) = (map.sin, map.cos);
    let step_u = cos * inv_scale_x;
    let step_v = -sin * inv_scale_y;
    let src_w_f = src_w as f32;
    let src_h_f = src_h as f32;

    for j in j_start..j_end {
        let y = top + j;
        let dy = y as f32 + 0.5 - map.cy;
        let dx = (left + i_start) as f32 + 0.5 - map.cx;

        let mut u = (half_w + dx * cos + dy * sin) * inv_scale_x;
        let mut v = (half_h - dx * sin + dy * cos) * inv_scale_y;
        let row = y as usize * WIDTH;

        for i in i_start..i_end {
            if u >= 0.0 && v >= 0.0 && u < src_w_f && v < src_h_f {
                let (color, alpha) = fetch(u as usize, v as usize);

                if alpha > 0.0 && transparent != Some(color) {
                    let index = row + (left + i) as usize;

                    let visible = match depth.as_mut() {
                        Some((buffer, d)) => buffer.test_and_set(index, *d),
                        None => true,
                    };

                    if visible {
                        let dst = &mut fb.pixels[index];
                        *dst = shader.execute(*dst, color, opacity * alpha);
                    }
                }
            }
            u += step_u;
            v += step_v;
        }
    }
}

impl Framebuffer {
    /// Blit a sprite centered at `transform` with rotation (radians) and scale
    pub fn blit<S: PixelShader>(&mut self, sprite: &Sprite, transform: &Transform, opacity: f32, shader: &S) {
        self.blit_in(sprite, transform, Viewport::SCREEN, opacity, shader);
    }

    /// Like [`Framebuffer::blit`] but only touching pixels inside `viewport`
    pub fn blit_in<S: PixelShader>(
        &mut self,
        sprite: &Sprite,
        transform: &Transform,
        viewport: Viewport,
        opacity: f32,
        shader: &S,
    ) {
        let map = ShearMap::from_transform(transform);
        shear_blit(
            self,
            viewport,
            sprite.src.w,
            sprite.src.h,
            &map,
            sprite.transparent,
            None,
            opacity,
            shader,
            |sx, sy| sprite.fetch(sx, sy),
        );
    }

    /// Depth-tested blit: the whole sprite sits at one `depth`
    #[allow(clippy::too_many_arguments)]
    pub fn blit_depth<S: PixelShader>(
        &mut self,
        sprite: &Sprite,
        transform: &Transform,
        depth: u16,
        depth_buffer: &mut DepthBuffer,
        opacity: f32,
        shader: &S,
    ) {
        let map = ShearMap::from_transform(transform);
        shear_blit(
            self,
            Viewport::SCREEN,
            sprite.src.w,
            sprite.src.h,
            &map,
            sprite.transparent,
            Some((depth_buffer, depth)),
            opacity,
            shader,
            |sx, sy| sprite.fetch(sx, sy),
        );
    }

    /// Fixed-point rotation entry point.
    ///
    /// `position` is rotated about `pivot` by `angle` using the precomputed
    /// shear table, then the sprite is drawn there rotated by the same angle.
    #[allow(clippy::too_many_arguments)]
    pub fn blit_pivot<S: PixelShader>(
        &mut self,
        sprite: &Sprite,
        position: Vec2,
        pivot: Vec2,
        angle: Angle,
        scale_x: f32,
        scale_y: f32,
        opacity: f32,
        shader: &S,
    ) {
        let center = angle.rotate_about(position, pivot);
        let (sin, cos) = angle.sin_cos();
        let map = ShearMap { cx: center.x, cy: center.y, sin, cos, scale_x, scale_y };
        shear_blit(
            self,
            Viewport::SCREEN,
            sprite.src.w,
            sprite.src.h,
            &map,
            sprite.transparent,
            None,
            opacity,
            shader,
            |sx, sy| sprite.fetch(sx, sy),
        );
    }

    /// Solid rectangle `w x h` centered at (cx, cy), scaled then rotated (radians)
    #[allow(clippy::too_many_arguments)]
    pub fn rect<S: PixelShader>(
        &mut self,
        color: Pixel,
        cx: f32,
        cy: f32,
        w: usize,
        h: usize,
        scale_x: f32,
        scale_y: f32,
        rotation: f32,
        opacity: f32,
        shader: &S,
    ) {
        let transform = Transform { x: cx, y: cy, rotation, scale_x, scale_y };
        self.rect_in(color, w, h, &transform, Viewport::SCREEN, opacity, shader);
    }

    /// Solid rectangle clipped to `viewport`
    #[allow(clippy::too_many_arguments)]
    pub fn rect_in<S: PixelShader>(
        &mut self,
        color: Pixel,
        w: usize,
        h: usize,
        transform: &Transform,
        viewport: Viewport,
        opacity: f32,
        shader: &S,
    ) {
        let map = ShearMap::from_transform(transform);
        shear_blit(self, viewport, w, h, &map, None, None, opacity, shader, |_, _| (color, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{EmptyShader, OpacityShader, PixelData, HEIGHT};

    fn blank() -> Framebuffer {
        let mut fb = Framebuffer::new().unwrap();
        fb.fill(Pixel::BLACK);
        fb
    }

    fn count_not(fb: &Framebuffer, color: Pixel) -> usize {
        fb.pixels.iter().filter(|&&p| p != color).count()
    }

    /// 2x2: TL red, TR green, BL blue, BR white
    fn checker_2x2() -> Texture {
        Texture::new(
            2,
            2,
            PixelData::Rgb565(vec![Pixel(0xF800), Pixel(0x07E0), Pixel(0x001F), Pixel(0xFFFF)]),
        )
        .unwrap()
    }

    /// 8x8 texture with a distinct color per texel
    fn gradient_8x8() -> Texture {
        let pixels = (0..64).map(|i| Pixel(0x0100 + i as u16)).collect();
        Texture::new(8, 8, PixelData::Rgb565(pixels)).unwrap()
    }

    #[test]
    fn test_checkerboard_scenario() {
        let tex = checker_2x2();
        let mut fb = blank();
        fb.blit(&Sprite::new(&tex), &Transform::at(64.0, 64.0), 1.0, &EmptyShader);

        assert_eq!(fb.get(63, 63), Some(Pixel(0xF800)));
        assert_eq!(fb.get(64, 63), Some(Pixel(0x07E0)));
        assert_eq!(fb.get(63, 64), Some(Pixel(0x001F)));
        assert_eq!(fb.get(64, 64), Some(Pixel(0xFFFF)));
        assert_eq!(count_not(&fb, Pixel::BLACK), 4);
    }

    #[test]
    fn test_identity_blit_reproduces_source() {
        let tex = gradient_8x8();
        let mut fb = blank();
        fb.blit(&Sprite::new(&tex), &Transform::at(64.0, 64.0), 1.0, &EmptyShader);

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(fb.get(60 + x as i32, 60 + y as i32), Some(tex.texel(x, y).0));
            }
        }
        assert_eq!(count_not(&fb, Pixel::BLACK), 64);
    }

    #[test]
    fn test_partially_offscreen_blit_clips() {
        let tex = gradient_8x8();
        let mut fb = blank();
        fb.blit(&Sprite::new(&tex), &Transform::at(0.0, 0.0), 1.0, &EmptyShader);

        // Only the bottom-right quadrant of the source lands on screen
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(fb.get(x as i32, y as i32), Some(tex.texel(x + 4, y + 4).0));
            }
        }
        assert_eq!(count_not(&fb, Pixel::BLACK), 16);

        fb.blit(&Sprite::new(&tex), &Transform::at(-500.0, 900.0), 1.0, &EmptyShader);
        assert_eq!(count_not(&fb, Pixel::BLACK), 16);
    }

    #[test]
    fn test_quarter_turn_fixed_point() {
        let tex = checker_2x2();
        let mut fb = blank();
        let center = Vec2::new(64.0, 64.0);
        fb.blit_pivot(&Sprite::new(&tex), center, center, Angle::QUARTER, 1.0, 1.0, 1.0, &EmptyShader);

        // Clockwise: TL moves to TR, TR to BR, BR to BL, BL to TL
        assert_eq!(fb.get(64, 63), Some(Pixel(0xF800)));
        assert_eq!(fb.get(64, 64), Some(Pixel(0x07E0)));
        assert_eq!(fb.get(63, 64), Some(Pixel(0xFFFF)));
        assert_eq!(fb.get(63, 63), Some(Pixel(0x001F)));
    }

    #[test]
    fn test_full_turn_matches_zero() {
        let tex = gradient_8x8();
        let sprite = Sprite::new(&tex);
        let center = Vec2::new(50.0, 70.0);
        let pivot = Vec2::new(64.0, 64.0);

        let mut zero = blank();
        zero.blit_pivot(&sprite, center, pivot, Angle::ZERO, 2.0, 2.0, 1.0, &EmptyShader);
        let mut full = blank();
        full.blit_pivot(&sprite, center, pivot, Angle::new(1024), 2.0, 2.0, 1.0, &EmptyShader);
        assert_eq!(zero.pixels, full.pixels);

        // Radians go through sin/cos directly, so allow a pixel of slack
        let mut radians = blank();
        let transform = Transform::at(50.0, 70.0).with_scale(2.0, 2.0).with_rotation(std::f32::consts::TAU);
        radians.blit(&sprite, &transform, 1.0, &EmptyShader);

        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                let want = zero.get(x, y);
                if radians.get(x, y) == want {
                    continue;
                }
                let near = (-1..=1).any(|oy| (-1..=1).any(|ox| radians.get(x + ox, y + oy) == want));
                assert!(near, "({}, {}) differs by more than a pixel", x, y);
            }
        }
    }

    #[test]
    fn test_scale_doubles_footprint() {
        let tex = checker_2x2();
        let mut fb = blank();
        let transform = Transform::at(64.0, 64.0).with_scale(2.0, 3.0);
        fb.blit(&Sprite::new(&tex), &transform, 1.0, &EmptyShader);

        assert_eq!(count_not(&fb, Pixel::BLACK), 24);
        assert_eq!(fb.get(62, 61), Some(Pixel(0xF800)));
        assert_eq!(fb.get(65, 66), Some(Pixel(0xFFFF)));
    }

    #[test]
    fn test_negative_scale_mirrors() {
        let tex = checker_2x2();
        let mut fb = blank();
        let transform = Transform::at(64.0, 64.0).with_scale(-1.0, 1.0);
        fb.blit(&Sprite::new(&tex), &transform, 1.0, &EmptyShader);

        assert_eq!(fb.get(63, 63), Some(Pixel(0x07E0)));
        assert_eq!(fb.get(64, 63), Some(Pixel(0xF800)));
    }

    #[test]
    fn test_transparent_key_is_skipped() {
        let tex = checker_2x2();
        let mut fb = blank();
        fb.fill(Pixel(0x1111));
        let sprite = Sprite::new(&tex).with_transparent(Pixel(0xFFFF));
        fb.blit(&sprite, &Transform::at(64.0, 64.0), 1.0, &EmptyShader);

        assert_eq!(fb.get(64, 64), Some(Pixel(0x1111)));
        assert_eq!(fb.get(63, 63), Some(Pixel(0xF800)));
    }

    #[test]
    fn test_source_rect_selects_frame() {
        let tex = gradient_8x8();
        let mut fb = blank();
        let sprite = Sprite::new(&tex).with_src(SourceRect::new(4, 2, 2, 2));
        fb.blit(&sprite, &Transform::at(64.0, 64.0), 1.0, &EmptyShader);

        assert_eq!(fb.get(63, 63), Some(tex.texel(4, 2).0));
        assert_eq!(fb.get(64, 64), Some(tex.texel(5, 3).0));
    }

    #[test]
    fn test_viewport_limits_writes() {
        let tex = gradient_8x8();
        let mut fb = blank();
        let viewport = Viewport::new(64, 64, 10, 10);
        fb.blit_in(&Sprite::new(&tex), &Transform::at(64.0, 64.0), viewport, 1.0, &EmptyShader);

        assert_eq!(count_not(&fb, Pixel::BLACK), 16);
        assert_eq!(fb.get(63, 63), Some(Pixel::BLACK));
        assert_eq!(fb.get(64, 64), Some(tex.texel(4, 4).0));
    }

    #[test]
    fn test_depth_blit_order_independence() {
        let red = Texture::new(4, 4, PixelData::Rgb565(vec![Pixel::RED; 16])).unwrap();
        let blue = Texture::new(4, 4, PixelData::Rgb565(vec![Pixel::BLUE; 16])).unwrap();
        let near = Transform::at(64.0, 64.0);
        let far = Transform::at(66.0, 66.0);

        let mut a = blank();
        let mut depth_a = DepthBuffer::new().unwrap();
        a.blit_depth(&Sprite::new(&red), &near, 100, &mut depth_a, 1.0, &EmptyShader);
        a.blit_depth(&Sprite::new(&blue), &far, 200, &mut depth_a, 1.0, &EmptyShader);

        let mut b = blank();
        let mut depth_b = DepthBuffer::new().unwrap();
        b.blit_depth(&Sprite::new(&blue), &far, 200, &mut depth_b, 1.0, &EmptyShader);
        b.blit_depth(&Sprite::new(&red), &near, 100, &mut depth_b, 1.0, &EmptyShader);

        assert_eq!(a.pixels, b.pixels);
        // Overlap stays red, blue only where red never reached
        assert_eq!(a.get(64, 64), Some(Pixel::RED));
        assert_eq!(a.get(67, 67), Some(Pixel::BLUE));
        assert_eq!(depth_a.get(64 * WIDTH + 64), 100);
    }

    #[test]
    fn test_rect_area_and_rotation() {
        let mut fb = blank();
        fb.rect(Pixel::GREEN, 64.0, 64.0, 10, 6, 1.0, 1.0, 0.0, 1.0, &EmptyShader);
        assert_eq!(count_not(&fb, Pixel::BLACK), 60);
        assert_eq!(fb.get(59, 61), Some(Pixel::GREEN));
        assert_eq!(fb.get(58, 61), Some(Pixel::BLACK));

        let mut rotated = blank();
        rotated.rect(Pixel::GREEN, 64.0, 64.0, 10, 6, 2.0, 2.0, 0.6, 1.0, &EmptyShader);
        let lit = count_not(&rotated, Pixel::BLACK);
        assert!((215..=265).contains(&lit), "rotated area {}", lit);
    }

    #[test]
    fn test_rect_respects_viewport() {
        let mut fb = blank();
        let transform = Transform::at(64.0, 64.0);
        fb.rect_in(Pixel::RED, 40, 40, &transform, Viewport::new(0, 0, 64, 128), 1.0, &EmptyShader);
        assert_eq!(count_not(&fb, Pixel::BLACK), 20 * 40);
        assert_eq!(fb.get(64, 64), Some(Pixel::BLACK));
    }

    #[test]
    fn test_texel_alpha_scales_opacity() {
        let tex = Texture::new(
            2,
            1,
            PixelData::AlphaMasked { colors: vec![Pixel::WHITE, Pixel::WHITE], alpha: vec![128, 255] },
        )
        .unwrap();
        let mut fb = blank();
        fb.blit(&Sprite::new(&tex), &Transform::at(64.0, 64.5), 1.0, &OpacityShader);

        assert_eq!(fb.get(63, 64).map(Pixel::channels), Some((16, 32, 16)));
        assert_eq!(fb.get(64, 64), Some(Pixel::WHITE));

        let mut fb = blank();
        fb.blit(&Sprite::new(&tex), &Transform::at(64.0, 64.5), 0.5, &OpacityShader);
        assert_eq!(fb.get(63, 64).map(Pixel::channels), Some((8, 16, 8)));
        assert_eq!(fb.get(64, 64).map(Pixel::channels), Some((16, 32, 16)));
    }

    #[test]
    fn test_far_offscreen_centers_draw_nothing() {
        let tex = checker_2x2();
        let mut fb = blank();
        for (x, y) in [(-3.0e9, 64.0), (64.0, 3.0e9), (f32::MAX, f32::MIN), (-1.0e30, -1.0e30)] {
            fb.blit(&Sprite::new(&tex), &Transform::at(x, y), 1.0, &EmptyShader);
            fb.rect(Pixel::WHITE, x, y, 4, 4, 1.0, 1.0, 0.3, 1.0, &EmptyShader);
        }
        assert_eq!(count_not(&fb, Pixel::BLACK), 0);
    }

    #[test]
    fn test_huge_scale_does_not_overflow() {
        let tex = checker_2x2();
        let mut fb = blank();
        let huge = Transform::at(64.0, 64.0).with_scale(1.0e30, 1.0e30);
        fb.blit(&Sprite::new(&tex), &huge, 1.0, &EmptyShader);

        let mut fb = blank();
        let far_viewport = Viewport::new(i32::MAX, i32::MAX, i32::MAX, 5);
        fb.rect_in(Pixel::WHITE, 2, 2, &Transform::at(0.0, 0.0), far_viewport, 1.0, &EmptyShader);
        assert_eq!(count_not(&fb, Pixel::BLACK), 0);
    }
}
