//! Pocket Raster preview
//!
//! Runs the demo scene through the software rasterizer and shows the
//! presented 128x128 screen scaled up in a desktop window.
//!
//! Reads `pocket-raster.ron` from the working directory when present.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod preview;

use macroquad::prelude::*;
use pocket_raster::config::load_config;
use pocket_raster::logging::{init_logging, LoggingConfig};
use pocket_raster::{EngineError, Pixel, RenderConfig, Renderer, HEIGHT, WIDTH};
use preview::Scene;

const CONFIG_PATH: &str = "pocket-raster.ron";

fn window_conf() -> Conf {
    let scale = RenderConfig::default().window_scale as i32;
    Conf {
        window_title: format!("Pocket Raster v{}", VERSION),
        window_width: WIDTH as i32 * scale,
        window_height: HEIGHT as i32 * scale,
        window_resizable: true,
        ..Default::default()
    }
}

/// Decode the configured sprite, falling back to the built-in one on failure
fn load_sprite(config: &RenderConfig) -> Option<pocket_raster::Texture> {
    let path = config.sprite_path.as_ref()?;
    let result = std::fs::read(path)
        .map_err(EngineError::from)
        .and_then(|bytes| pocket_raster::Texture::from_image_bytes(&bytes, path.display().to_string()));

    match result {
        Ok(texture) => {
            log::info!("loaded sprite {} ({}x{})", path.display(), texture.width, texture.height);
            Some(texture)
        }
        Err(e) => {
            log::warn!("failed to load sprite {}: {}", path.display(), e);
            None
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let loaded = load_config(CONFIG_PATH);
    let config = loaded.as_ref().ok().cloned().unwrap_or_default();

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..Default::default()
    });

    match &loaded {
        Ok(_) => log::info!("loaded {}", CONFIG_PATH),
        Err(EngineError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("no {} found, using defaults", CONFIG_PATH);
        }
        Err(e) => log::warn!("ignoring {}: {}", CONFIG_PATH, e),
    }

    let mut renderer = match Renderer::new(&config) {
        Ok(renderer) => renderer,
        Err(e) => {
            log::error!("failed to create renderer: {}", e);
            return;
        }
    };

    let mut scene = match Scene::new(load_sprite(&config)) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("failed to build demo scene: {}", e);
            return;
        }
    };

    let scale = config.window_scale.max(1) as f32;
    if config.window_scale != RenderConfig::default().window_scale {
        request_new_screen_size(WIDTH as f32 * scale, HEIGHT as f32 * scale);
    }

    let clear = Pixel(config.clear_color);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        scene.update(get_frame_time());

        let mut frame = renderer.begin_frame(clear);
        scene.draw(&mut frame);
        let shown = renderer.swap();

        // Present the finished screen, letterboxed at the largest integer scale that fits
        let texture = Texture2D::from_rgba8(WIDTH as u16, HEIGHT as u16, &shown.to_rgba8());
        texture.set_filter(FilterMode::Nearest);

        let fit = (screen_width() / WIDTH as f32).min(screen_height() / HEIGHT as f32).floor().max(1.0);
        let draw_w = WIDTH as f32 * fit;
        let draw_h = HEIGHT as f32 * fit;
        let draw_x = ((screen_width() - draw_w) * 0.5).floor();
        let draw_y = ((screen_height() - draw_h) * 0.5).floor();

        clear_background(Color::from_rgba(16, 16, 16, 255));
        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        next_frame().await;
    }
}
