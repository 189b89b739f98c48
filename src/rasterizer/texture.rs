//! Textures in the pixel formats the device stores
//!
//! Fetching a texel is a single `match` on the format, so the blitter and
//! triangle loops never go through a function pointer.

use super::color::Pixel;
use crate::error::EngineError;

/// Texel storage, one variant per pixel format
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// Opaque RGB565 texels
    Rgb565(Vec<Pixel>),
    /// RGB565 texels plus an 8-bit alpha plane of the same layout
    AlphaMasked { colors: Vec<Pixel>, alpha: Vec<u8> },
    /// 8-bit indices into an RGB565 palette
    Paletted { indices: Vec<u8>, palette: Vec<Pixel> },
}

impl PixelData {
    fn len(&self) -> usize {
        match self {
            PixelData::Rgb565(colors) => colors.len(),
            PixelData::AlphaMasked { colors, alpha } => colors.len().min(alpha.len()),
            PixelData::Paletted { indices, .. } => indices.len(),
        }
    }
}

/// Read-only texture handle used by the blitter, triangles and fonts
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    /// Texels per row in `data` (>= width; sprite sheets share rows)
    pub stride: usize,
    pub data: PixelData,
    pub name: String,
}

impl Texture {
    /// Wrap texel data laid out `width` texels per row
    pub fn new(width: usize, height: usize, data: PixelData) -> Result<Self, EngineError> {
        Self::with_stride(width, height, width, data)
    }

    /// Wrap texel data with an explicit row stride
    pub fn with_stride(
        width: usize,
        height: usize,
        stride: usize,
        data: PixelData,
    ) -> Result<Self, EngineError> {
        let expected = stride.max(width) * height;
        let actual = data.len();
        if actual < expected {
            return Err(EngineError::InvalidTexture { expected, actual });
        }
        Ok(Self {
            width,
            height,
            stride: stride.max(width),
            data,
            name: String::new(),
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Create a checkerboard test texture with `cell`-sized squares
    pub fn checkerboard(width: usize, height: usize, cell: usize, color1: Pixel, color2: Pixel) -> Self {
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / cell) + (y / cell)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self {
            width,
            height,
            stride: width,
            data: PixelData::Rgb565(pixels),
            name: "checkerboard".to_string(),
        }
    }

    /// Decode a PNG/JPEG/BMP on the host side.
    ///
    /// Fully opaque images become `Rgb565`; anything with transparency keeps
    /// its alpha as `AlphaMasked`.
    pub fn from_image_bytes(bytes: &[u8], name: impl Into<String>) -> Result<Self, EngineError> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut colors = Vec::with_capacity((width * height) as usize);
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for p in rgba.pixels() {
            colors.push(Pixel::rgb(p[0], p[1], p[2]));
            alpha.push(p[3]);
        }

        let data = if alpha.iter().all(|&a| a == 255) {
            PixelData::Rgb565(colors)
        } else {
            PixelData::AlphaMasked { colors, alpha }
        };

        Ok(Self::new(width as usize, height as usize, data)?.named(name))
    }

    /// Fetch the texel at `offset` (row * stride + column) as (color, alpha 0..1).
    ///
    /// Offsets past the data read as transparent black.
    #[inline]
    pub fn get_pixel(&self, offset: usize) -> (Pixel, f32) {
        match &self.data {
            PixelData::Rgb565(colors) => match colors.get(offset) {
                Some(&c) => (c, 1.0),
                None => (Pixel::BLACK, 0.0),
            },
            PixelData::AlphaMasked { colors, alpha } => match (colors.get(offset), alpha.get(offset)) {
                (Some(&c), Some(&a)) => (c, a as f32 / 255.0),
                _ => (Pixel::BLACK, 0.0),
            },
            PixelData::Paletted { indices, palette } => {
                match indices.get(offset).and_then(|&i| palette.get(i as usize)) {
                    Some(&c) => (c, 1.0),
                    None => (Pixel::BLACK, 0.0),
                }
            }
        }
    }

    /// Texel at integer coordinates
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> (Pixel, f32) {
        self.get_pixel(y * self.stride + x)
    }

    /// Nearest-neighbour sample at normalized UV, wrapping outside [0, 1)
    pub fn sample(&self, u: f32, v: f32) -> (Pixel, f32) {
        if self.width == 0 || self.height == 0 {
            return (Pixel::BLACK, 0.0);
        }
        let tx = ((u * self.width as f32).floor() as i64).rem_euclid(self.width as i64) as usize;
        let ty = ((v * self.height as f32).floor() as i64).rem_euclid(self.height as i64) as usize;
        self.texel(tx, ty)
    }
}
