//! Per-pixel shaders
//!
//! A shader decides the final color of one destination pixel from the
//! background already in the buffer, the incoming foreground and an opacity.
//! Every draw call is generic over [`PixelShader`], so built-ins compile down
//! to straight-line code and the plain-write path costs nothing.

use super::color::Pixel;

/// Per-pixel blend function
pub trait PixelShader {
    fn execute(&self, bg: Pixel, fg: Pixel, opacity: f32) -> Pixel;
}

/// Writes the foreground untouched (opacity is ignored)
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyShader;

/// Per-channel alpha blend of foreground over background
#[derive(Debug, Clone, Copy, Default)]
pub struct OpacityShader;

/// Target color and strength for tinting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub color: Pixel,
    /// 0.0 leaves the foreground alone, 1.0 replaces it with `color`
    pub factor: f32,
}

impl Tint {
    pub fn new(color: Pixel, factor: f32) -> Self {
        Self { color, factor }
    }
}

/// Tints the foreground, then alpha blends it over the background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendOpacityShader {
    pub tint: Tint,
}

/// Runtime choice between the built-in shaders
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shader {
    Empty,
    Opacity,
    BlendOpacity(Tint),
}

impl Shader {
    /// Cheapest shader that produces the requested effect
    pub fn select(opacity: f32, tint: Option<Tint>) -> Shader {
        match tint {
            Some(tint) if tint.factor > 0.0 => Shader::BlendOpacity(tint),
            _ if opacity < 1.0 => Shader::Opacity,
            _ => Shader::Empty,
        }
    }
}

impl Default for Shader {
    fn default() -> Self {
        Shader::Empty
    }
}

/// `a*(1-t) + b*t`, rounded and clamped to the channel range
fn mix_channel(a: u16, b: u16, t: f32, max: u16) -> u16 {
    let v = (a as f32 * (1.0 - t) + b as f32 * t).round();
    v.clamp(0.0, max as f32) as u16
}

/// Blend two RGB565 colors channel by channel
fn mix(a: Pixel, b: Pixel, t: f32) -> Pixel {
    let t = t.clamp(0.0, 1.0);
    let (ar, ag, ab) = a.channels();
    let (br, bg, bb) = b.channels();
    Pixel::from_channels(
        mix_channel(ar, br, t, 0x1F),
        mix_channel(ag, bg, t, 0x3F),
        mix_channel(ab, bb, t, 0x1F),
    )
}

impl PixelShader for EmptyShader {
    #[inline]
    fn execute(&self, _bg: Pixel, fg: Pixel, _opacity: f32) -> Pixel {
        fg
    }
}

impl PixelShader for OpacityShader {
    #[inline]
    fn execute(&self, bg: Pixel, fg: Pixel, opacity: f32) -> Pixel {
        mix(bg, fg, opacity)
    }
}

impl PixelShader for BlendOpacityShader {
    #[inline]
    fn execute(&self, bg: Pixel, fg: Pixel, opacity: f32) -> Pixel {
        let tinted = mix(fg, self.tint.color, self.tint.factor);
        mix(bg, tinted, opacity)
    }
}

impl PixelShader for Shader {
    #[inline]
    fn execute(&self, bg: Pixel, fg: Pixel, opacity: f32) -> Pixel {
        match self {
            Shader::Empty => EmptyShader.execute(bg, fg, opacity),
            Shader::Opacity => OpacityShader.execute(bg, fg, opacity),
            Shader::BlendOpacity(tint) => BlendOpacityShader { tint: *tint }.execute(bg, fg, opacity),
        }
    }
}

impl<S: PixelShader + ?Sized> PixelShader for &S {
    #[inline]
    fn execute(&self, bg: Pixel, fg: Pixel, opacity: f32) -> Pixel {
        (**self).execute(bg, fg, opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [u16; 6] = [0x0000, 0xFFFF, 0xF800, 0x07E0, 0x001F, 0x8A52];

    #[test]
    fn test_empty_returns_foreground() {
        for &bg in &SAMPLES {
            for &fg in &SAMPLES {
                for opacity in [0.0, 0.3, 1.0, 7.0] {
                    assert_eq!(EmptyShader.execute(Pixel(bg), Pixel(fg), opacity), Pixel(fg));
                }
            }
        }
    }

    #[test]
    fn test_opacity_endpoints() {
        for &bg in &SAMPLES {
            for &fg in &SAMPLES {
                assert_eq!(OpacityShader.execute(Pixel(bg), Pixel(fg), 0.0), Pixel(bg));
                assert_eq!(OpacityShader.execute(Pixel(bg), Pixel(fg), 1.0), Pixel(fg));
            }
        }
    }

    #[test]
    fn test_opacity_half_blend() {
        let out = OpacityShader.execute(Pixel::BLACK, Pixel::WHITE, 0.5);
        // 31*0.5 = 15.5 rounds to 16, 63*0.5 = 31.5 rounds to 32
        assert_eq!(out.channels(), (16, 32, 16));
    }

    #[test]
    fn test_opacity_is_clamped() {
        assert_eq!(OpacityShader.execute(Pixel::BLACK, Pixel::WHITE, 2.0), Pixel::WHITE);
        assert_eq!(OpacityShader.execute(Pixel::BLACK, Pixel::WHITE, -1.0), Pixel::BLACK);
    }

    #[test]
    fn test_full_tint_replaces_color() {
        let shader = BlendOpacityShader { tint: Tint::new(Pixel::RED, 1.0) };
        assert_eq!(shader.execute(Pixel::BLACK, Pixel::BLUE, 1.0), Pixel::RED);
        // Zero opacity still shows only the background
        assert_eq!(shader.execute(Pixel::GREEN, Pixel::BLUE, 0.0), Pixel::GREEN);
    }

    #[test]
    fn test_partial_tint_then_opacity() {
        // Blue tinted halfway to red is (16, 0, 16); half of that over black
        // rounds to (8, 0, 8)
        let shader = BlendOpacityShader { tint: Tint::new(Pixel::RED, 0.5) };
        assert_eq!(shader.execute(Pixel::BLACK, Pixel::BLUE, 1.0).channels(), (16, 0, 16));
        assert_eq!(shader.execute(Pixel::BLACK, Pixel::BLUE, 0.5).channels(), (8, 0, 8));

        // Over a green background the two blends combine per channel
        let out = shader.execute(Pixel::GREEN, Pixel::WHITE, 0.5);
        // White tinted halfway to red: (31, 32, 16); half over green (0, 63, 0)
        assert_eq!(out.channels(), (16, 48, 8));
        assert_eq!(Shader::BlendOpacity(shader.tint).execute(Pixel::GREEN, Pixel::WHITE, 0.5), out);
    }

    #[test]
    fn test_select_picks_cheapest() {
        assert_eq!(Shader::select(1.0, None), Shader::Empty);
        assert_eq!(Shader::select(0.5, None), Shader::Opacity);
        assert_eq!(Shader::select(1.0, Some(Tint::new(Pixel::RED, 0.0))), Shader::Empty);
        let tint = Tint::new(Pixel::RED, 0.5);
        assert_eq!(Shader::select(1.0, Some(tint)), Shader::BlendOpacity(tint));
    }
}
