//! 16-bit depth buffer shared by depth-tested blits and triangles

use super::{HEIGHT, WIDTH};
use crate::error::EngineError;

/// Nearest depth written so far per pixel (0 = nearest, 65535 = farthest)
pub struct DepthBuffer {
    values: Vec<u16>,
}

impl DepthBuffer {
    /// Allocate a buffer cleared to the far plane
    pub fn new() -> Result<Self, EngineError> {
        let len = WIDTH * HEIGHT;
        let mut values = Vec::new();
        values.try_reserve_exact(len).map_err(|_| EngineError::OutOfMemory {
            what: "depth buffer",
            bytes: len * std::mem::size_of::<u16>(),
        })?;
        values.resize(len, u16::MAX);
        Ok(Self { values })
    }

    /// Reset every pixel to the far plane; done by the frame driver between frames
    pub fn clear(&mut self) {
        self.values.fill(u16::MAX);
    }

    /// Depth at a pixel index (`y * WIDTH + x`)
    pub fn get(&self, index: usize) -> u16 {
        self.values[index]
    }

    /// Store `depth` if it is strictly nearer than what is there.
    /// Returns whether the pixel passed.
    #[inline]
    pub fn test_and_set(&mut self, index: usize, depth: u16) -> bool {
        if depth < self.values[index] {
            self.values[index] = depth;
            true
        } else {
            false
        }
    }

    /// Strictly-nearer test without writing
    #[inline]
    pub fn passes(&self, index: usize, depth: u16) -> bool {
        depth < self.values[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, depth: u16) {
        self.values[index] = depth;
    }
}
