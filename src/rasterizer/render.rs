//! Frame driver
//!
//! Owns the two screens and the optional depth buffer, and hands out both for
//! one frame at a time so draw calls can borrow them together.

use super::color::Pixel;
use super::depth::DepthBuffer;
use super::screen::{Framebuffer, ScreenBuffers};
use crate::config::RenderConfig;
use crate::error::EngineError;

/// Everything a frame draws into
pub struct Frame<'a> {
    pub fb: &'a mut Framebuffer,
    /// Present only when the renderer was built with a depth buffer
    pub depth: Option<&'a mut DepthBuffer>,
}

/// Screens plus depth buffer, allocated once at startup
pub struct Renderer {
    screens: ScreenBuffers,
    depth: Option<DepthBuffer>,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Result<Self, EngineError> {
        let mut screens = ScreenBuffers::new();
        screens.init()?;

        let depth = if config.depth_buffer {
            Some(DepthBuffer::new()?)
        } else {
            None
        };

        log::info!(
            "renderer ready ({} depth buffer)",
            if depth.is_some() { "with" } else { "without" }
        );

        Ok(Self { screens, depth })
    }

    /// Clear the active screen and reset depth to the far plane
    pub fn begin_frame(&mut self, clear: Pixel) -> Frame<'_> {
        self.screens.active_mut().fill(clear);
        if let Some(depth) = self.depth.as_mut() {
            depth.clear();
        }
        self.frame()
    }

    /// Borrow the active screen and depth buffer without clearing
    pub fn frame(&mut self) -> Frame<'_> {
        Frame {
            fb: self.screens.active_mut(),
            depth: self.depth.as_mut(),
        }
    }

    /// Finish the frame. Returns the screen that was just drawn, ready to present.
    pub fn swap(&mut self) -> &Framebuffer {
        self.screens.swap();
        self.screens.inactive()
    }

    pub fn screens(&self) -> &ScreenBuffers {
        &self.screens
    }

    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }
}
