//! Error type shared by the engine and its host-side loaders
//!
//! Drawing never fails: off-screen pixels, transparent texels and failed depth
//! tests are skipped silently. Only allocation and loading can error.

/// Errors reported by the engine
#[derive(Debug)]
pub enum EngineError {
    /// A framebuffer or depth buffer could not be allocated
    OutOfMemory { what: &'static str, bytes: usize },
    IoError(std::io::Error),
    ConfigParse(ron::error::SpannedError),
    ConfigSerialize(ron::Error),
    ImageError(image::ImageError),
    /// Pixel data does not cover `stride * height` entries
    InvalidTexture { expected: usize, actual: usize },
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for EngineError {
    fn from(e: ron::error::SpannedError) -> Self {
        EngineError::ConfigParse(e)
    }
}

impl From<ron::Error> for EngineError {
    fn from(e: ron::Error) -> Self {
        EngineError::ConfigSerialize(e)
    }
}

impl From<image::ImageError> for EngineError {
    fn from(e: image::ImageError) -> Self {
        EngineError::ImageError(e)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::OutOfMemory { what, bytes } => {
                write!(f, "Out of memory allocating {} ({} bytes)", what, bytes)
            }
            EngineError::IoError(e) => write!(f, "IO error: {}", e),
            EngineError::ConfigParse(e) => write!(f, "Config parse error: {}", e),
            EngineError::ConfigSerialize(e) => write!(f, "Config serialize error: {}", e),
            EngineError::ImageError(e) => write!(f, "Image error: {}", e),
            EngineError::InvalidTexture { expected, actual } => write!(
                f,
                "Invalid texture: expected {} pixels, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::IoError(e) => Some(e),
            EngineError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}
