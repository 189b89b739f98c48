//! Demo scene: one of everything the rasterizer draws

use pocket_raster::{
    Angle, BitmapFont, BlendOpacityShader, EmptyShader, EngineError, Frame, OpacityShader, Pixel,
    Shader, Sprite, TextLayout, Texture, Tint, Transform, Vec2, Viewport,
};

use super::font::small_font;
use super::mesh::{Cube, Vec3};

/// Where the cube and the orbiting sprite are centered
const STAGE: Vec2 = Vec2 { x: 64.0, y: 68.0 };

pub struct Scene {
    checker: Texture,
    sprite: Texture,
    font: BitmapFont,
    cube: Cube,
    time: f32,
}

impl Scene {
    /// `sprite` replaces the built-in orbiting sprite when given
    pub fn new(sprite: Option<Texture>) -> Result<Self, EngineError> {
        let checker = Texture::checkerboard(16, 16, 4, Pixel::rgb(230, 200, 60), Pixel::rgb(40, 60, 160))
            .named("checker");
        let sprite = sprite.unwrap_or_else(|| {
            Texture::checkerboard(12, 12, 3, Pixel::WHITE, Pixel::RED).named("sprite")
        });

        Ok(Self {
            checker,
            sprite,
            font: small_font()?,
            cube: Cube::new(Vec3::new(0.0, 0.0, 4.0), 1.0),
            time: 0.0,
        })
    }

    pub fn update(&mut self, dt: f32) {
        // Wrap so long sessions keep float precision
        self.time = (self.time + dt) % 1000.0;
        self.cube.yaw = self.time * 0.9;
        self.cube.pitch = self.time * 0.6;
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let fb = &mut *frame.fb;

        // Backdrop
        let grid = Pixel::rgb(30, 30, 50);
        for i in 0..8 {
            let x = i * 16 + 8;
            fb.line(grid, x, 12, x, 127, 1.0, &EmptyShader);
        }
        fb.outline_circle(Pixel::rgb(80, 80, 120), STAGE.x as i32, STAGE.y as i32, 40, 1.0, &EmptyShader);

        let sprite = Sprite::new(&self.sprite);

        if let Some(depth) = frame.depth.as_deref_mut() {
            self.cube.draw(fb, depth, &self.checker, STAGE, 1.0, &EmptyShader);

            // Billboard sliding through the cube's depth range
            let z = 7500.0 + 4500.0 * self.time.sin();
            let billboard = Transform::at(STAGE.x, STAGE.y).with_scale(0.75, 0.75);
            fb.blit_depth(&sprite, &billboard, z as u16, depth, 1.0, &EmptyShader);
        }

        // Sprite orbiting the stage on fixed-point angles
        let angle = Angle::from_radians(self.time);
        let above = Vec2::new(STAGE.x, STAGE.y - 42.0);
        fb.blit_pivot(&sprite, above, STAGE, angle, 1.0, 1.0, 1.0, &EmptyShader);

        // Translucent tinted rect, lower left
        let shader = Shader::select(0.7, Some(Tint::new(Pixel::RED, 0.5)));
        fb.rect(Pixel::WHITE, 20.0, 108.0, 16, 10, 1.0, 1.0, self.time * 0.5, 0.7, &shader);

        // Flat shapes, lower right
        let (a, b, c) = (Vec2::new(96.0, 100.0), Vec2::new(120.0, 100.0), Vec2::new(108.0, 122.0));
        fb.filled_triangle(Pixel::GREEN, a, b, c, 0.5, &OpacityShader);
        fb.filled_circle(Pixel::BLUE, 108, 108, 4, 1.0, &EmptyShader);

        // Spinning checker clipped to a corner window
        let window = Viewport::new(2, 14, 24, 24);
        let spin = Transform::at(14.0, 26.0).with_rotation(-self.time).with_scale(2.0, 2.0);
        fb.blit_in(&Sprite::new(&self.checker), &spin, window, 1.0, &EmptyShader);

        let title = "POCKET RASTER";
        let layout = TextLayout::fit(&self.font, title, 64.0, 5.0, 1.0, 1.0, 1.0, 1.0);
        fb.draw_text(&self.font, title, &layout, 1.0, &EmptyShader);

        let caption = "Hello\nworld!";
        let layout = TextLayout::fit(&self.font, caption, 108.0, 24.0, 1.0, 1.0, 1.0, 1.0)
            .with_rotation(0.3 * self.time.sin());
        let green = BlendOpacityShader { tint: Tint::new(Pixel::GREEN, 0.6) };
        fb.draw_text(&self.font, caption, &layout, 1.0, &green);
    }
}
