//! Immediate-mode drawing surface
//!
//! Each shape is first rasterized into a coverage mask, then its color is alpha
//! blended once onto every covered pixel of an opaque RGBA buffer. Translucent
//! colors therefore act as even overlays (shadows, highlights, flames), however
//! many times the rasterizer touches a pixel. Shapes that fall outside the
//! surface are clipped.

use image::{DynamicImage, GrayImage, Luma, Pixel, Rgba, RgbImage, RgbaImage};
use imageproc::{
    drawing::{
        draw_filled_ellipse_mut, draw_filled_rect_mut, draw_hollow_polygon_mut,
        draw_hollow_rect_mut, draw_line_segment_mut, draw_polygon_mut,
    },
    point::Point,
    rect::Rect,
};

const COVERED: Luma<u8> = Luma([255]);

/// Opaque color
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Color with explicit opacity
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

/// Corner coordinates of a shape, both corners included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BoundingBox {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Square box of side `2 * radius` around a center
    pub const fn around(cx: i32, cy: i32, radius: i32) -> Self {
        Self::new(cx - radius, cy - radius, cx + radius, cy + radius)
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    fn normalized(self) -> Self {
        Self::new(
            self.x0.min(self.x1),
            self.y0.min(self.y1),
            self.x0.max(self.x1),
            self.y0.max(self.y1),
        )
    }

    fn width(&self) -> u32 {
        (self.x1 - self.x0 + 1) as u32
    }

    fn height(&self) -> u32 {
        (self.y1 - self.y0 + 1) as u32
    }

    fn expand(self, by: i32) -> Self {
        Self::new(self.x0 - by, self.y0 - by, self.x1 + by, self.y1 + by)
    }

    fn enclosing(points: &[(i32, i32)]) -> Self {
        points.iter().fold(
            Self::new(i32::MAX, i32::MAX, i32::MIN, i32::MIN),
            |acc, &(x, y)| Self::new(acc.x0.min(x), acc.y0.min(y), acc.x1.max(x), acc.y1.max(y)),
        )
    }
}

/// Pixels covered by one shape, over a window of the canvas
struct Coverage {
    mask: GrayImage,
    x0: i32,
    y0: i32,
}

impl Coverage {
    /// Window over `region` clipped to the canvas plus a one pixel margin,
    /// `None` when the region misses the canvas entirely.
    fn new(region: BoundingBox, width: u32, height: u32) -> Option<Self> {
        let region = region.normalized();
        let x0 = region.x0.max(-1);
        let y0 = region.y0.max(-1);
        let x1 = region.x1.min(width as i32);
        let y1 = region.y1.min(height as i32);

        if x0 > x1 || y0 > y1 {
            return None;
        }

        Some(Self {
            mask: GrayImage::new((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32),
            x0,
            y0,
        })
    }

    fn local(&self, (x, y): (i32, i32)) -> (i32, i32) {
        (x - self.x0, y - self.y0)
    }

    fn local_f32(&self, point: (i32, i32)) -> (f32, f32) {
        let (x, y) = self.local(point);
        (x as f32, y as f32)
    }

    fn local_rect(&self, bbox: BoundingBox) -> Rect {
        let (x, y) = self.local((bbox.x0, bbox.y0));
        Rect::at(x, y).of_size(bbox.width(), bbox.height())
    }

    fn covered(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as u32) < self.mask.width()
            && (y as u32) < self.mask.height()
            && self.mask.get_pixel(x as u32, y as u32)[0] > 0
    }

    /// Union of the mask with itself moved one pixel right and/or down
    fn grow(&mut self, right: bool, down: bool) {
        let (w, h) = self.mask.dimensions();

        if right {
            for y in 0..h {
                for x in (1..w).rev() {
                    if self.mask.get_pixel(x - 1, y)[0] > 0 {
                        self.mask.put_pixel(x, y, COVERED);
                    }
                }
            }
        }

        if down {
            for y in (1..h).rev() {
                for x in 0..w {
                    if self.mask.get_pixel(x, y - 1)[0] > 0 {
                        self.mask.put_pixel(x, y, COVERED);
                    }
                }
            }
        }
    }

    /// Covered pixels with at least one uncovered 4-neighbour
    fn boundary(&self) -> Self {
        let mask = GrayImage::from_fn(self.mask.width(), self.mask.height(), |x, y| {
            let (x, y) = (x as i32, y as i32);
            let edge = self.covered(x, y)
                && [(-1, 0), (1, 0), (0, -1), (0, 1)]
                    .iter()
                    .any(|(dx, dy)| !self.covered(x + dx, y + dy));

            Luma([if edge { 255 } else { 0 }])
        });

        Self {
            mask,
            x0: self.x0,
            y0: self.y0,
        }
    }
}

pub struct Canvas {
    surface: RgbaImage,
}

impl Canvas {
    /// Solid background
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        let background = Rgba([background[0], background[1], background[2], 255]);
        Self {
            surface: RgbaImage::from_pixel(width, height, background),
        }
    }

    /// Start from an existing opaque image, e.g. a gradient
    pub fn from_rgb(image: RgbImage) -> Self {
        Self {
            surface: DynamicImage::ImageRgb8(image).into_rgba8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Color at `(x, y)`, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.surface.get_pixel_checked(x, y).copied()
    }

    fn coverage(&self, region: BoundingBox) -> Option<Coverage> {
        Coverage::new(region, self.width(), self.height())
    }

    /// Blend `color` exactly once onto each covered pixel
    fn paint(&mut self, coverage: &Coverage, color: Rgba<u8>) {
        for (lx, ly, value) in coverage.mask.enumerate_pixels() {
            if value[0] == 0 {
                continue;
            }

            let (x, y) = (coverage.x0 + lx as i32, coverage.y0 + ly as i32);
            if x < 0 || y < 0 {
                continue;
            }

            if let Some(pixel) = self.surface.get_pixel_mut_checked(x as u32, y as u32) {
                pixel.blend(&color);
            }
        }
    }

    /// Filled and/or outlined box. The outline grows inward by `width` pixels.
    pub fn rectangle(
        &mut self,
        bbox: BoundingBox,
        fill: Option<Rgba<u8>>,
        outline: Option<Rgba<u8>>,
        width: u32,
    ) {
        let bbox = bbox.normalized();

        if let Some(color) = fill {
            if let Some(mut coverage) = self.coverage(bbox) {
                let rect = coverage.local_rect(bbox);
                draw_filled_rect_mut(&mut coverage.mask, rect, COVERED);
                self.paint(&coverage, color);
            }
        }

        if let Some(color) = outline {
            if let Some(mut coverage) = self.coverage(bbox) {
                for inset in 0..width as i32 {
                    let inner = bbox.expand(-inset);
                    if inner.x0 > inner.x1 || inner.y0 > inner.y1 {
                        break;
                    }

                    let rect = coverage.local_rect(inner);
                    draw_hollow_rect_mut(&mut coverage.mask, rect, COVERED);
                }

                self.paint(&coverage, color);
            }
        }
    }

    /// Straight segment. Strokes wider than one pixel become a band, an
    /// axis-aligned box when possible and a quad otherwise.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba<u8>, width: u32) {
        let half = width as i32 / 2;
        let w = width as i32;

        if width <= 1 {
            let Some(mut coverage) = self.coverage(BoundingBox::enclosing(&[from, to])) else {
                return;
            };

            let (start, end) = (coverage.local_f32(from), coverage.local_f32(to));
            draw_line_segment_mut(&mut coverage.mask, start, end, COVERED);
            self.paint(&coverage, color);
        } else if from.1 == to.1 {
            let band = BoundingBox::new(from.0, from.1 - half, to.0, from.1 - half + w - 1);
            self.rectangle(band, Some(color), None, 0);
        } else if from.0 == to.0 {
            let band = BoundingBox::new(from.0 - half, from.1, from.0 - half + w - 1, to.1);
            self.rectangle(band, Some(color), None, 0);
        } else {
            let (dx, dy) = ((to.0 - from.0) as f32, (to.1 - from.1) as f32);
            let length = (dx * dx + dy * dy).sqrt();
            let (nx, ny) = (-dy / length * width as f32 / 2.0, dx / length * width as f32 / 2.0);

            let corner = |(x, y): (i32, i32), sign: f32| {
                (
                    (x as f32 + sign * nx).round() as i32,
                    (y as f32 + sign * ny).round() as i32,
                )
            };

            let band = [
                corner(from, 1.0),
                corner(to, 1.0),
                corner(to, -1.0),
                corner(from, -1.0),
            ];
            self.polygon(&band, Some(color), None);
        }
    }

    /// Ellipse inscribed in the bounding box, covering all of its columns and rows
    pub fn ellipse(&mut self, bbox: BoundingBox, fill: Option<Rgba<u8>>, outline: Option<Rgba<u8>>) {
        let bbox = bbox.normalized();
        let Some(mut coverage) = self.coverage(bbox) else {
            return;
        };

        // imageproc ellipses span an odd number of pixels; even sized boxes
        // take the next smaller one and grow it by a column and/or a row.
        let (rx, ry) = ((bbox.width() as i32 - 1) / 2, (bbox.height() as i32 - 1) / 2);
        let center = coverage.local((bbox.x0 + rx, bbox.y0 + ry));
        draw_filled_ellipse_mut(&mut coverage.mask, center, rx, ry, COVERED);
        coverage.grow(bbox.width() % 2 == 0, bbox.height() % 2 == 0);

        if let Some(color) = fill {
            self.paint(&coverage, color);
        }

        if let Some(color) = outline {
            self.paint(&coverage.boundary(), color);
        }
    }

    /// Closed polygon through `points`, implicitly joining the last point to the first
    pub fn polygon(
        &mut self,
        points: &[(i32, i32)],
        fill: Option<Rgba<u8>>,
        outline: Option<Rgba<u8>>,
    ) {
        let mut points = points.to_vec();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        if points.len() < 3 {
            log::warn!("skip degenerate polygon with {} points", points.len());
            return;
        }

        let region = BoundingBox::enclosing(&points);

        if let Some(color) = fill {
            if let Some(mut area) = self.coverage(region) {
                let vertices: Vec<Point<i32>> = points
                    .iter()
                    .map(|&p| {
                        let (x, y) = area.local(p);
                        Point::new(x, y)
                    })
                    .collect();

                draw_polygon_mut(&mut area.mask, &vertices, COVERED);
                self.paint(&area, color);
            }
        }

        if let Some(color) = outline {
            if let Some(mut edges) = self.coverage(region) {
                let vertices: Vec<Point<f32>> = points
                    .iter()
                    .map(|&p| {
                        let (x, y) = edges.local_f32(p);
                        Point::new(x, y)
                    })
                    .collect();

                draw_hollow_polygon_mut(&mut edges.mask, &vertices, COVERED);
                self.paint(&edges, color);
            }
        }
    }

    /// Drop the alpha channel. The surface is always opaque, so nothing is lost.
    pub fn into_rgb(self) -> RgbImage {
        DynamicImage::ImageRgba8(self.surface).into_rgb8()
    }
}
