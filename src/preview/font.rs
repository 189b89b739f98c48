//! Built-in 3x5 pixel font for the preview overlay

use pocket_raster::{BitmapFont, EngineError, Pixel, PixelData, Texture};

const GLYPH_W: usize = 3;
const GLYPH_H: usize = 5;
const GLYPH_COUNT: usize = 95;

/// Palette index 0 is the color key, 1 is ink
const KEY: Pixel = Pixel(0xF81F);

/// Rows of a glyph, three bits each with the MSB on the left.
/// Lowercase shares the uppercase shapes.
fn rows(ch: u8) -> [u8; GLYPH_H] {
    match ch.to_ascii_uppercase() {
        b'0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        b'1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        b'2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        b'3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        b'4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        b'5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        b'6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        b'7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        b'8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        b'9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        b'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        b'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        b'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        b'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        b'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        b'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        b'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        b'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        b'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        b'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        b'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        b'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        b'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        b'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        b'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        b'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        b'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        b'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        b'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        b'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        b'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        b'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        b'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        b'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        b'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        b'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        b'.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        b',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        b':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        b'!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        b'?' => [0b111, 0b001, 0b010, 0b000, 0b010],
        b'-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        b'+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        b'=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        b'_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        b'/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        b'(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        b')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        b'<' => [0b001, 0b010, 0b100, 0b010, 0b001],
        b'>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        b'%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        b'#' => [0b101, 0b111, 0b101, 0b111, 0b101],
        b'*' => [0b101, 0b010, 0b101, 0b000, 0b000],
        b'\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        b'"' => [0b101, 0b101, 0b000, 0b000, 0b000],
        _ => [0; GLYPH_H],
    }
}

/// Monospace font with white ink; tint it through a shader for color
pub fn small_font() -> Result<BitmapFont, EngineError> {
    let width = GLYPH_W * GLYPH_COUNT;
    let mut indices = vec![0u8; width * GLYPH_H];

    for (g, ch) in (b' '..=b'~').enumerate() {
        for (y, bits) in rows(ch).iter().enumerate() {
            for x in 0..GLYPH_W {
                if bits & (0b100 >> x) != 0 {
                    indices[y * width + g * GLYPH_W + x] = 1;
                }
            }
        }
    }

    let data = PixelData::Paletted { indices, palette: vec![KEY, Pixel::WHITE] };
    let texture = Texture::new(width, GLYPH_H, data)?.named("small_font");
    Ok(BitmapFont::monospace(texture, GLYPH_W, GLYPH_H).with_transparent(KEY))
}
