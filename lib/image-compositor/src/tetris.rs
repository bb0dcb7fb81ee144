use crate::{
    CompositorError, CompositorResult, Scene,
    canvas::{BoundingBox, Canvas, rgb, rgba},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{RgbImage, Rgba};
use rand::{Rng, RngCore};

pub const BACKGROUND: Rgba<u8> = rgb(20, 20, 25);
pub const GRID_COLOR: Rgba<u8> = rgb(40, 40, 50);
pub const PURPLE: Rgba<u8> = rgb(160, 0, 240);

pub const PALETTE: [Rgba<u8>; 7] = [
    rgb(0, 240, 240), // Cyan
    rgb(0, 0, 240),   // Blue
    rgb(240, 160, 0), // Orange
    rgb(240, 240, 0), // Yellow
    rgb(0, 240, 0),   // Green
    PURPLE,
    rgb(240, 0, 0), // Red
];

/// Cells of the falling T piece relative to its anchor block
const T_PIECE: [(i32, i32); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

/// Tetris playfield thumbnail configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct TetrisConfig {
    #[derivative(Default(value = "600"))]
    width: u32,

    #[derivative(Default(value = "400"))]
    height: u32,

    #[derivative(Default(value = "30"))]
    block_size: u32,

    /// Chance that a column gets a stack of blocks
    #[derivative(Default(value = "0.7"))]
    fill_chance: f64,

    #[derivative(Default(value = "5"))]
    max_stack: u32,
}

impl TetrisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-left corner of the anchor block of the falling piece
    pub fn falling_anchor(&self) -> (i32, i32) {
        (self.width as i32 / 2, 100)
    }

    fn draw_grid(&self, canvas: &mut Canvas) {
        let (w, h) = (self.width as i32, self.height as i32);

        for x in (0..w).step_by(self.block_size as usize) {
            canvas.line((x, 0), (x, h), GRID_COLOR, 1);
        }

        for y in (0..h).step_by(self.block_size as usize) {
            canvas.line((0, y), (w, y), GRID_COLOR, 1);
        }
    }

    /// Solid block with a bevel: light top/left edges, dark right/bottom edges
    fn draw_block(&self, canvas: &mut Canvas, x: i32, y: i32, color: Rgba<u8>, highlight: u8) {
        let far = self.block_size as i32 - 1;
        let light = rgba(255, 255, 255, highlight);
        let dark = rgba(0, 0, 0, 100);

        canvas.rectangle(
            BoundingBox::new(x + 1, y + 1, x + far, y + far),
            Some(color),
            None,
            0,
        );
        canvas.line((x + 1, y + 1), (x + far, y + 1), light, 2);
        canvas.line((x + 1, y + 1), (x + 1, y + far), light, 2);
        canvas.line((x + far, y + 1), (x + far, y + far), dark, 2);
        canvas.line((x + 1, y + far), (x + far, y + far), dark, 2);
    }

    fn draw_stacks(&self, canvas: &mut Canvas, rng: &mut dyn RngCore) {
        let block = self.block_size as i32;
        let mut total = 0;

        for x in (0..self.width as i32).step_by(self.block_size as usize) {
            if rng.random::<f64>() <= 1.0 - self.fill_chance {
                continue;
            }

            let stack = rng.random_range(1..=self.max_stack.max(1)) as i32;
            for i in 0..stack {
                let y = self.height as i32 - (i + 1) * block;
                let color = PALETTE[rng.random_range(0..PALETTE.len())];
                self.draw_block(canvas, x, y, color, 150);
            }

            total += stack;
        }

        log::debug!("tetris: stacked {total} blocks");
    }

    fn draw_falling_piece(&self, canvas: &mut Canvas) {
        let (fx, fy) = self.falling_anchor();
        let block = self.block_size as i32;

        for (dx, dy) in T_PIECE {
            let bx = fx + dx * block;
            let by = fy + dy * block;

            self.draw_block(canvas, bx, by, PURPLE, 200);
            canvas.rectangle(
                BoundingBox::new(bx - 2, by - 2, bx + block + 2, by + block + 2),
                None,
                Some(PURPLE),
                1,
            );
        }
    }
}

impl Scene for TetrisConfig {
    fn name(&self) -> &'static str {
        "Tetris"
    }

    fn file_name(&self) -> &'static str {
        "tetris_thumbnail.png"
    }

    fn render(&self, rng: &mut dyn RngCore) -> CompositorResult<RgbImage> {
        if self.block_size < 4 {
            return Err(CompositorError::InvalidParameter(format!(
                "block size {} is too small",
                self.block_size
            )));
        }

        let mut canvas = Canvas::new(self.width, self.height, BACKGROUND);

        self.draw_grid(&mut canvas);
        self.draw_stacks(&mut canvas, rng);
        self.draw_falling_piece(&mut canvas);

        Ok(canvas.into_rgb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn render(config: &TetrisConfig, seed: u64) -> RgbImage {
        config.render(&mut StdRng::seed_from_u64(seed)).unwrap()
    }

    fn is_palette(pixel: [u8; 3]) -> bool {
        PALETTE.iter().any(|c| [c[0], c[1], c[2]] == pixel)
    }

    #[test]
    fn test_background_and_grid() {
        let image = render(&TetrisConfig::new(), 11);

        assert_eq!(image.dimensions(), (600, 400));
        assert_eq!(image.get_pixel(0, 0).0, [40, 40, 50]);
        assert_eq!(image.get_pixel(30, 10).0, [40, 40, 50]);
        assert_eq!(image.get_pixel(5, 5).0, [20, 20, 25]);
    }

    #[test]
    fn test_falling_piece_is_purple() {
        let config = TetrisConfig::new();
        let (fx, fy) = config.falling_anchor();

        for seed in [0, 1, 2] {
            let image = render(&config, seed);
            for (dx, dy) in T_PIECE {
                let cx = (fx + dx * 30 + 15) as u32;
                let cy = (fy + dy * 30 + 15) as u32;
                assert_eq!(image.get_pixel(cx, cy).0, [160, 0, 240]);
            }
        }
    }

    #[test]
    fn test_bottom_blocks_use_palette() {
        let image = render(&TetrisConfig::new(), 8);

        for x in (0..600).step_by(30) {
            let center = image.get_pixel(x + 15, 400 - 15).0;
            assert!(
                center == [20, 20, 25] || is_palette(center),
                "column {x}: {center:?}"
            );
        }
    }

    #[test]
    fn test_full_columns() {
        let config = TetrisConfig::new().with_fill_chance(1.0).with_max_stack(1);
        let image = render(&config, 3);

        for x in (0..600).step_by(30) {
            assert!(is_palette(image.get_pixel(x + 15, 385).0));
            assert_eq!(image.get_pixel(x + 15, 355).0, [20, 20, 25]);
        }
    }

    #[test]
    fn test_empty_columns() {
        let config = TetrisConfig::new().with_fill_chance(0.0);
        let image = render(&config, 3);

        for x in (0..600).step_by(30) {
            assert_eq!(image.get_pixel(x + 15, 385).0, [20, 20, 25]);
        }
    }

    #[test]
    fn test_same_seed_same_pixels() {
        let config = TetrisConfig::new();
        assert_eq!(render(&config, 77), render(&config, 77));
    }

    #[test]
    fn test_block_size_too_small() {
        let config = TetrisConfig::new().with_block_size(2);
        assert!(matches!(
            config.render(&mut StdRng::seed_from_u64(0)),
            Err(CompositorError::InvalidParameter(_))
        ));
    }
}
