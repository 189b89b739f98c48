//! Bitmap font text
//!
//! Glyphs live side by side in one texture row strip. Text is laid out along
//! a rotated basis and each glyph goes through the sprite blitter, so rotated
//! and scaled text costs the same per pixel as any other sprite.

use std::f32::consts::FRAC_PI_2;

use super::blit::Sprite;
use super::color::Pixel;
use super::math::Vec2;
use super::screen::Framebuffer;
use super::shader::PixelShader;
use super::texture::Texture;
use super::types::{SourceRect, Transform};

/// First and last characters with glyphs (printable ASCII)
const FIRST_GLYPH: u8 = b' ';
const LAST_GLYPH: u8 = b'~';

/// Position of one glyph in the font strip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Glyph {
    /// Column of the glyph's left edge in the font texture
    pub offset: usize,
    pub width: usize,
}

/// Bitmap font: a strip texture plus per-glyph widths and offsets
#[derive(Debug, Clone)]
pub struct BitmapFont {
    pub texture: Texture,
    pub glyph_height: usize,
    /// One entry per character from ' ' to '~'
    pub glyphs: Vec<Glyph>,
    /// Color treated as background in the strip
    pub transparent: Option<Pixel>,
}

impl BitmapFont {
    /// Every glyph `glyph_width` wide, packed left to right
    pub fn monospace(texture: Texture, glyph_width: usize, glyph_height: usize) -> Self {
        let count = (LAST_GLYPH - FIRST_GLYPH + 1) as usize;
        let glyphs = (0..count)
            .map(|i| Glyph { offset: i * glyph_width, width: glyph_width })
            .collect();
        Self { texture, glyph_height, glyphs, transparent: None }
    }

    /// Glyphs packed left to right with individual widths
    pub fn proportional(texture: Texture, glyph_height: usize, widths: &[usize]) -> Self {
        let mut offset = 0;
        let glyphs = widths
            .iter()
            .map(|&width| {
                let glyph = Glyph { offset, width };
                offset += width;
                glyph
            })
            .collect();
        Self { texture, glyph_height, glyphs, transparent: None }
    }

    pub fn with_transparent(mut self, key: Pixel) -> Self {
        self.transparent = Some(key);
        self
    }

    /// Glyph for `ch`; anything unprintable renders as '?'.
    /// Characters past the end of `glyphs` have zero width.
    pub fn glyph(&self, ch: char) -> Glyph {
        let index = (printable(ch) - FIRST_GLYPH) as usize;
        self.glyphs.get(index).copied().unwrap_or_default()
    }

    /// Unscaled (width, height) of the laid-out text.
    /// Spacing is only counted between glyphs and lines, not after the last.
    pub fn measure(&self, text: &str, letter_spacing: f32, line_spacing: f32) -> (f32, f32) {
        let mut widest = 0.0f32;
        let mut lines = 0;

        for line in text.split('\n') {
            lines += 1;
            let mut width = 0.0;
            let mut count = 0;
            for ch in line.chars() {
                width += self.glyph(ch).width as f32;
                count += 1;
            }
            if count > 1 {
                width += letter_spacing * (count - 1) as f32;
            }
            widest = widest.max(width);
        }

        let glyph_h = self.glyph_height as f32;
        let height = glyph_h * lines as f32 + line_spacing * (lines - 1) as f32;
        (widest, height)
    }
}

/// Printable ASCII passes through, everything else becomes '?'
fn printable(ch: char) -> u8 {
    if ch.is_ascii() && (FIRST_GLYPH..=LAST_GLYPH).contains(&(ch as u8)) {
        ch as u8
    } else {
        b'?'
    }
}

/// Placement of a block of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    /// Center of the text box on screen
    pub x: f32,
    pub y: f32,
    /// Box size in screen pixels; the box rotates about its center
    pub box_w: f32,
    pub box_h: f32,
    pub letter_spacing: f32,
    pub line_spacing: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Radians, clockwise on screen
    pub rotation: f32,
}

impl TextLayout {
    pub fn new(x: f32, y: f32, box_w: f32, box_h: f32) -> Self {
        Self {
            x,
            y,
            box_w,
            box_h,
            letter_spacing: 0.0,
            line_spacing: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }

    /// Box sized to fit `text` exactly at the given spacing and scale
    #[allow(clippy::too_many_arguments)]
    pub fn fit(
        font: &BitmapFont,
        text: &str,
        x: f32,
        y: f32,
        letter_spacing: f32,
        line_spacing: f32,
        scale_x: f32,
        scale_y: f32,
    ) -> Self {
        let (w, h) = font.measure(text, letter_spacing, line_spacing);
        Self {
            letter_spacing,
            line_spacing,
            scale_x,
            scale_y,
            ..Self::new(x, y, w * scale_x, h * scale_y)
        }
    }

    pub fn with_spacing(mut self, letter_spacing: f32, line_spacing: f32) -> Self {
        self.letter_spacing = letter_spacing;
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_scale(mut self, scale_x: f32, scale_y: f32) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Framebuffer {
    /// Draw `text` inside the rotated box described by `layout`
    pub fn draw_text<S: PixelShader>(
        &mut self,
        font: &BitmapFont,
        text: &str,
        layout: &TextLayout,
        opacity: f32,
        shader: &S,
    ) {
        let right = Vec2::from_angle(layout.rotation);
        let down = Vec2::from_angle(layout.rotation + FRAC_PI_2);

        let glyph_h = font.glyph_height as f32;
        let line_advance = down * ((glyph_h + layout.line_spacing) * layout.scale_y);
        // Offset from a glyph's top-left corner to the point down its left edge
        let half_down = down * (glyph_h * layout.scale_y * 0.5);

        let center = Vec2::new(layout.x, layout.y);
        let mut line_start = center - right * (layout.box_w * 0.5) - down * (layout.box_h * 0.5);
        let mut cursor = line_start;

        for ch in text.chars() {
            if ch == '\n' {
                line_start = line_start + line_advance;
                cursor = line_start;
                continue;
            }

            let glyph = font.glyph(ch);
            let glyph_w = glyph.width as f32;

            if glyph.width > 0 && font.glyph_height > 0 {
                let pos = cursor + right * (glyph_w * layout.scale_x * 0.5) + half_down;
                let sprite = Sprite {
                    texture: &font.texture,
                    src: SourceRect::new(glyph.offset, 0, glyph.width, font.glyph_height),
                    transparent: font.transparent,
                };
                let transform = Transform {
                    x: pos.x,
                    y: pos.y,
                    rotation: layout.rotation,
                    scale_x: layout.scale_x,
                    scale_y: layout.scale_y,
                };
                self.blit(&sprite, &transform, opacity, shader);
            }

            cursor = cursor + right * ((glyph_w + layout.letter_spacing) * layout.scale_x);
        }
    }
}
