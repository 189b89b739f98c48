//! Renderer configuration
//!
//! Uses RON (Rusty Object Notation) so hosts can tweak settings by hand.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use crate::error::EngineError;

/// Settings read once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Allocate a depth buffer for depth-tested blits and triangles
    pub depth_buffer: bool,
    /// RGB565 color used to clear the screen each frame
    pub clear_color: u16,
    /// Integer upscale factor for the preview window
    pub window_scale: u32,
    /// `env_logger` filter; `RUST_LOG` is used when unset
    pub log_filter: Option<String>,
    /// Optional PNG to use as the preview sprite
    pub sprite_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            depth_buffer: true,
            clear_color: 0x0000,
            window_scale: 5,
            log_filter: None,
            sprite_path: None,
        }
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, EngineError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<RenderConfig, EngineError> {
    let config: RenderConfig = ron::from_str(s)?;
    Ok(config)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &RenderConfig, path: P) -> Result<(), EngineError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(2)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = load_config_from_str("(depth_buffer: false)").unwrap();
        assert!(!config.depth_buffer);
        assert_eq!(config.window_scale, 5);
        assert_eq!(config.clear_color, 0x0000);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = load_config_from_str("(depth_buffer: maybe)").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("pocket-raster-{}.ron", std::process::id()));
        let config = RenderConfig {
            clear_color: 0x001F,
            log_filter: Some("debug".to_string()),
            ..Default::default()
        };

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, EngineError::IoError(_)));
    }
}
