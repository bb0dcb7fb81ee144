pub mod canvas;
pub mod gradient;
pub mod othello;
pub mod output;
pub mod shooter;
pub mod tetris;

use image::RgbImage;
use rand::RngCore;

pub use canvas::{BoundingBox, Canvas};
pub use output::{ensure_output_dir, generate_all, write_thumbnail};

pub type CompositorResult<T> = Result<T, CompositorError>;

#[derive(thiserror::Error, Debug)]
pub enum CompositorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A thumbnail that can be painted from scratch onto a fresh canvas.
pub trait Scene {
    /// Short human readable name used in progress messages.
    fn name(&self) -> &'static str;

    /// File name of the PNG written for this scene.
    fn file_name(&self) -> &'static str;

    fn render(&self, rng: &mut dyn RngCore) -> CompositorResult<RgbImage>;
}

#[derive(Debug, Clone)]
pub enum ThumbnailScene {
    Othello(othello::OthelloConfig),
    SpaceShooter(shooter::SpaceShooterConfig),
    Tetris(tetris::TetrisConfig),
}

impl ThumbnailScene {
    /// All thumbnails with default settings, in generation order.
    pub fn all() -> Vec<ThumbnailScene> {
        vec![
            ThumbnailScene::Othello(othello::OthelloConfig::new()),
            ThumbnailScene::SpaceShooter(shooter::SpaceShooterConfig::new()),
            ThumbnailScene::Tetris(tetris::TetrisConfig::new()),
        ]
    }
}

impl Scene for ThumbnailScene {
    fn name(&self) -> &'static str {
        match self {
            ThumbnailScene::Othello(config) => config.name(),
            ThumbnailScene::SpaceShooter(config) => config.name(),
            ThumbnailScene::Tetris(config) => config.name(),
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            ThumbnailScene::Othello(config) => config.file_name(),
            ThumbnailScene::SpaceShooter(config) => config.file_name(),
            ThumbnailScene::Tetris(config) => config.file_name(),
        }
    }

    fn render(&self, rng: &mut dyn RngCore) -> CompositorResult<RgbImage> {
        match self {
            ThumbnailScene::Othello(config) => config.render(rng),
            ThumbnailScene::SpaceShooter(config) => config.render(rng),
            ThumbnailScene::Tetris(config) => config.render(rng),
        }
    }
}
