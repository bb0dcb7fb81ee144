use crate::{
    CompositorResult, Scene,
    canvas::{BoundingBox, Canvas, rgb, rgba},
    gradient::{GradientConfig, create_gradient},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgb, RgbImage, Rgba};
use rand::{Rng, RngCore};

pub const SHIP_FILL: Rgba<u8> = rgb(0, 200, 255);
pub const LASER: Rgba<u8> = rgb(255, 0, 100);
const FIRE: [(u8, u8, u8); 3] = [(255, 200, 0), (255, 100, 0), (255, 255, 200)];

/// Space shooter thumbnail configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SpaceShooterConfig {
    #[derivative(Default(value = "600"))]
    width: u32,

    #[derivative(Default(value = "400"))]
    height: u32,

    #[derivative(Default(value = "100"))]
    stars: u32,

    #[derivative(Default(value = "20"))]
    explosion_fragments: u32,
}

impl SpaceShooterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nose-to-tail anchor of the player ship
    pub fn ship_position(&self) -> (i32, i32) {
        (self.width as i32 / 2, self.height as i32 - 80)
    }

    fn draw_stars(&self, canvas: &mut Canvas, rng: &mut dyn RngCore) {
        for _ in 0..self.stars {
            let x = rng.random_range(0..=self.width as i32);
            let y = rng.random_range(0..=self.height as i32);
            let brightness = rng.random_range(100..=255u8);
            let size = rng.random_range(1..=3);

            canvas.ellipse(
                BoundingBox::new(x, y, x + size, y + size),
                Some(rgb(brightness, brightness, brightness)),
                None,
            );
        }
    }

    fn draw_player(&self, canvas: &mut Canvas) {
        let (sx, sy) = self.ship_position();

        canvas.polygon(
            &[(sx, sy - 30), (sx - 20, sy + 20), (sx, sy + 10), (sx + 20, sy + 20)],
            Some(SHIP_FILL),
            Some(rgb(100, 255, 255)),
        );

        // Engine flame
        canvas.polygon(
            &[(sx - 10, sy + 20), (sx + 10, sy + 20), (sx, sy + 40)],
            Some(rgba(255, 100, 0, 180)),
            None,
        );

        canvas.line((sx - 15, sy), (sx - 15, 0), LASER, 3);
        canvas.line((sx + 15, sy), (sx + 15, 0), LASER, 3);
    }

    fn draw_enemy(&self, canvas: &mut Canvas) {
        let (ex, ey) = (self.width as i32 / 2 - 50, 100);

        canvas.polygon(
            &[(ex, ey), (ex + 40, ey), (ex + 20, ey + 30)],
            Some(rgb(255, 50, 50)),
            Some(rgb(255, 150, 150)),
        );
    }

    fn draw_explosion(&self, canvas: &mut Canvas, rng: &mut dyn RngCore) {
        let (cx, cy) = (self.width as i32 / 2 + 50, 80);

        for _ in 0..self.explosion_fragments {
            let radius = rng.random_range(5..=20);
            let ox = cx + rng.random_range(-20..=20);
            let oy = cy + rng.random_range(-20..=20);
            let (r, g, b) = FIRE[rng.random_range(0..FIRE.len())];

            canvas.ellipse(
                BoundingBox::around(ox, oy, radius),
                Some(rgba(r, g, b, 200)),
                None,
            );
        }
    }
}

impl Scene for SpaceShooterConfig {
    fn name(&self) -> &'static str {
        "Shooter"
    }

    fn file_name(&self) -> &'static str {
        "space_shooter_thumbnail.png"
    }

    fn render(&self, rng: &mut dyn RngCore) -> CompositorResult<RgbImage> {
        let background = create_gradient(&GradientConfig::from_colors(
            self.width,
            self.height,
            Rgb([10, 0, 30]),
            Rgb([0, 0, 10]),
        ))?;
        let mut canvas = Canvas::from_rgb(background);

        self.draw_stars(&mut canvas, rng);
        self.draw_player(&mut canvas);
        self.draw_enemy(&mut canvas);
        self.draw_explosion(&mut canvas, rng);

        log::debug!(
            "shooter: {} stars, {} explosion fragments",
            self.stars,
            self.explosion_fragments
        );

        Ok(canvas.into_rgb())
    }
}
