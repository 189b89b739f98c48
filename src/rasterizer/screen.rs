//! Framebuffers and the double-buffer manager
//!
//! The renderer always writes the active buffer while the display transfer
//! reads the inactive one. The manager does no locking: the frame driver must
//! wait for the transfer of the inactive buffer to finish before calling
//! [`ScreenBuffers::swap`].

use super::color::Pixel;
use super::types::Viewport;
use super::{HEIGHT, WIDTH};
use crate::error::EngineError;

/// One 128x128 RGB565 screen
pub struct Framebuffer {
    pub pixels: Vec<Pixel>,
}

impl Framebuffer {
    /// Allocate a black screen, reporting allocation failure instead of aborting
    pub fn new() -> Result<Self, EngineError> {
        let len = WIDTH * HEIGHT;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| EngineError::OutOfMemory {
            what: "screen buffer",
            bytes: len * std::mem::size_of::<Pixel>(),
        })?;
        pixels.resize(len, Pixel::BLACK);
        Ok(Self { pixels })
    }

    /// A zero-sized buffer; every checked write is dropped
    fn unallocated() -> Self {
        Self { pixels: Vec::new() }
    }

    pub fn is_allocated(&self) -> bool {
        !self.pixels.is_empty()
    }

    /// Read a pixel; `None` outside the screen
    pub fn get(&self, x: i32, y: i32) -> Option<Pixel> {
        if !Viewport::SCREEN.contains(x, y) {
            return None;
        }
        self.pixels.get(y as usize * WIDTH + x as usize).copied()
    }

    /// Expand to RGBA bytes for presenting on the host
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            bytes.extend_from_slice(&p.to_rgba8());
        }
        bytes
    }
}

/// Owns both screens and tracks which one is being drawn
pub struct ScreenBuffers {
    buffers: [Framebuffer; 2],
    active: usize,
}

impl ScreenBuffers {
    /// Manager with nothing allocated yet; call [`ScreenBuffers::init`]
    pub fn new() -> Self {
        Self {
            buffers: [Framebuffer::unallocated(), Framebuffer::unallocated()],
            active: 0,
        }
    }

    /// Allocate both screens. Repeat calls keep the existing buffers.
    pub fn init(&mut self) -> Result<(), EngineError> {
        if self.is_initialized() {
            return Ok(());
        }
        self.buffers = [Framebuffer::new()?, Framebuffer::new()?];
        self.active = 0;
        log::debug!("allocated two {}x{} screen buffers", WIDTH, HEIGHT);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.buffers[0].is_allocated() && self.buffers[1].is_allocated()
    }

    /// Index (0 or 1) of the buffer being drawn
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Framebuffer {
        &self.buffers[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Framebuffer {
        &mut self.buffers[self.active]
    }

    /// The buffer handed to the display transfer
    pub fn inactive(&self) -> &Framebuffer {
        &self.buffers[self.active ^ 1]
    }

    /// Flip buffers; the freshly drawn one becomes inactive
    pub fn swap(&mut self) {
        self.active ^= 1;
    }
}

impl Default for ScreenBuffers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::EmptyShader;

    #[test]
    fn test_init_is_idempotent() {
        let mut screens = ScreenBuffers::new();
        assert!(!screens.is_initialized());
        screens.init().unwrap();
        screens.active_mut().fill(Pixel::RED);
        screens.init().unwrap();
        assert_eq!(screens.active().get(5, 5), Some(Pixel::RED));
    }

    #[test]
    fn test_swap_flips_active() {
        let mut screens = ScreenBuffers::new();
        screens.init().unwrap();
        screens.active_mut().fill(Pixel::GREEN);
        assert_eq!(screens.active_index(), 0);
        screens.swap();
        assert_eq!(screens.active_index(), 1);
        assert_eq!(screens.inactive().get(0, 0), Some(Pixel::GREEN));
        assert_eq!(screens.active().get(0, 0), Some(Pixel::BLACK));
        screens.swap();
        assert_eq!(screens.active_index(), 0);
    }

    #[test]
    fn test_draw_before_init_is_dropped() {
        let mut screens = ScreenBuffers::new();
        screens.active_mut().pixel(Pixel::WHITE, 1, 1, 1.0, &EmptyShader);
        screens.active_mut().fill(Pixel::WHITE);
        assert_eq!(screens.active().get(1, 1), None);
    }

    #[test]
    fn test_rgba_export() {
        let mut fb = Framebuffer::new().unwrap();
        fb.fill(Pixel::WHITE);
        let bytes = fb.to_rgba8();
        assert_eq!(bytes.len(), WIDTH * HEIGHT * 4);
        assert!(bytes.iter().all(|&b| b == 255));
    }
}
