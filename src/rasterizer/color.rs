//! RGB565 pixel type

/// 16-bit packed color: 5 bits red, 6 bits green, 5 bits blue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel(pub u16);

impl Pixel {
    pub const BLACK: Pixel = Pixel(0x0000);
    pub const WHITE: Pixel = Pixel(0xFFFF);
    pub const RED: Pixel = Pixel(0xF800);
    pub const GREEN: Pixel = Pixel(0x07E0);
    pub const BLUE: Pixel = Pixel(0x001F);

    /// Pack 8-bit channels, dropping the low bits
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3))
    }

    /// Pack raw 5/6/5-bit channels (out-of-range bits are masked off)
    pub fn from_channels(r: u16, g: u16, b: u16) -> Self {
        Self(((r & 0x1F) << 11) | ((g & 0x3F) << 5) | (b & 0x1F))
    }

    /// Raw (red 0-31, green 0-63, blue 0-31) channels
    pub fn channels(self) -> (u16, u16, u16) {
        ((self.0 >> 11) & 0x1F, (self.0 >> 5) & 0x3F, self.0 & 0x1F)
    }

    /// Expand to 8-bit RGBA for display on the host
    pub fn to_rgba8(self) -> [u8; 4] {
        let (r, g, b) = self.channels();
        // Replicate high bits into the low bits so 0x1F maps to 0xFF
        [
            ((r << 3) | (r >> 2)) as u8,
            ((g << 2) | (g >> 4)) as u8,
            ((b << 3) | (b >> 2)) as u8,
            255,
        ]
    }
}

impl From<u16> for Pixel {
    fn from(v: u16) -> Self {
        Pixel(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_packing() {
        assert_eq!(Pixel::rgb(255, 0, 0), Pixel::RED);
        assert_eq!(Pixel::rgb(0, 255, 0), Pixel::GREEN);
        assert_eq!(Pixel::rgb(0, 0, 255), Pixel::BLUE);
        assert_eq!(Pixel::rgb(255, 255, 255), Pixel::WHITE);
    }

    #[test]
    fn test_channels_roundtrip() {
        let p = Pixel::from_channels(17, 42, 3);
        assert_eq!(p.channels(), (17, 42, 3));
    }

    #[test]
    fn test_to_rgba8_extremes() {
        assert_eq!(Pixel::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Pixel::BLACK.to_rgba8(), [0, 0, 0, 255]);
    }
}
