use crate::{
    CompositorResult, Scene,
    canvas::{BoundingBox, Canvas, rgb, rgba},
    gradient::{GradientConfig, create_gradient},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgb, RgbImage, Rgba};
use rand::RngCore;

const GRID_COLOR: Rgba<u8> = rgb(50, 150, 80);
const BOARD_FILL: Rgba<u8> = rgba(20, 80, 40, 200);
const SHADOW: Rgba<u8> = rgba(0, 0, 0, 100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disk {
    White,
    Black,
}

impl Disk {
    pub fn fill(&self) -> Rgba<u8> {
        match self {
            Disk::White => rgb(240, 240, 240),
            Disk::Black => rgb(20, 20, 20),
        }
    }

    pub fn outline(&self) -> Rgba<u8> {
        match self {
            Disk::White => rgb(200, 200, 200),
            Disk::Black => rgb(50, 50, 50),
        }
    }

    fn highlight(&self) -> Rgba<u8> {
        match self {
            Disk::White => rgba(255, 255, 255, 200),
            Disk::Black => rgba(255, 255, 255, 100),
        }
    }
}

/// A disk placed on the board at `(col, row)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub col: u32,
    pub row: u32,
    pub disk: Disk,
}

impl Piece {
    pub const fn new(col: u32, row: u32, disk: Disk) -> Self {
        Self { col, row, disk }
    }
}

/// Opening position plus a few moves of play
pub fn default_pieces() -> Vec<Piece> {
    vec![
        Piece::new(3, 3, Disk::White),
        Piece::new(4, 3, Disk::Black),
        Piece::new(3, 4, Disk::Black),
        Piece::new(4, 4, Disk::White),
        Piece::new(2, 4, Disk::Black),
        Piece::new(2, 3, Disk::White),
        Piece::new(5, 3, Disk::Black),
    ]
}

/// Othello board thumbnail configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct OthelloConfig {
    #[derivative(Default(value = "600"))]
    width: u32,

    #[derivative(Default(value = "400"))]
    height: u32,

    #[derivative(Default(value = "40"))]
    cell_size: u32,

    #[derivative(Default(value = "8"))]
    rows: u32,

    #[derivative(Default(value = "8"))]
    cols: u32,

    #[derivative(Default(value = "default_pieces()"))]
    pieces: Vec<Piece>,
}

impl OthelloConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Top-left corner of the grid, centered on the canvas
    pub fn board_origin(&self) -> (i32, i32) {
        (
            (self.width as i32 - (self.cols * self.cell_size) as i32).div_euclid(2),
            (self.height as i32 - (self.rows * self.cell_size) as i32).div_euclid(2),
        )
    }

    /// Pixel center of a board cell
    pub fn cell_center(&self, col: u32, row: u32) -> (i32, i32) {
        let (start_x, start_y) = self.board_origin();
        let cell = self.cell_size as i32;
        (
            start_x + col as i32 * cell + cell / 2,
            start_y + row as i32 * cell + cell / 2,
        )
    }

    fn draw_board(&self, canvas: &mut Canvas) {
        let (start_x, start_y) = self.board_origin();
        let board_w = (self.cols * self.cell_size) as i32;
        let board_h = (self.rows * self.cell_size) as i32;
        let cell = self.cell_size as i32;

        canvas.rectangle(
            BoundingBox::new(start_x - 10, start_y - 10, start_x + board_w + 10, start_y + board_h + 10),
            Some(BOARD_FILL),
            Some(GRID_COLOR),
            2,
        );

        for i in 0..=self.rows as i32 {
            let y = start_y + i * cell;
            canvas.line((start_x, y), (start_x + board_w, y), GRID_COLOR, 1);
        }

        for i in 0..=self.cols as i32 {
            let x = start_x + i * cell;
            canvas.line((x, start_y), (x, start_y + board_h), GRID_COLOR, 1);
        }
    }

    fn draw_piece(&self, canvas: &mut Canvas, piece: &Piece) {
        let (cx, cy) = self.cell_center(piece.col, piece.row);
        let radius = self.cell_size as i32 / 2 - 4;
        let body = BoundingBox::around(cx, cy, radius);

        canvas.ellipse(body.offset(2, 4), Some(SHADOW), None);
        canvas.ellipse(body, Some(piece.disk.fill()), Some(piece.disk.outline()));
        canvas.ellipse(
            BoundingBox::new(cx - radius + 5, cy - radius + 5, cx - radius + 12, cy - radius + 10),
            Some(piece.disk.highlight()),
            None,
        );
    }
}

impl Scene for OthelloConfig {
    fn name(&self) -> &'static str {
        "Othello"
    }

    fn file_name(&self) -> &'static str {
        "othello_thumbnail.png"
    }

    fn render(&self, _rng: &mut dyn RngCore) -> CompositorResult<RgbImage> {
        let background = create_gradient(&GradientConfig::from_colors(
            self.width,
            self.height,
            Rgb([10, 60, 30]),
            Rgb([5, 30, 15]),
        ))?;
        let mut canvas = Canvas::from_rgb(background);

        self.draw_board(&mut canvas);

        for piece in &self.pieces {
            self.draw_piece(&mut canvas, piece);
        }

        log::debug!("othello: drew {} pieces", self.pieces.len());

        Ok(canvas.into_rgb())
    }
}
