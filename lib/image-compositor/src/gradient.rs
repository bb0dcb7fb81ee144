use crate::{CompositorError, CompositorResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, Luma, Rgb, RgbImage};

/// Vertical two color gradient configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GradientConfig {
    #[derivative(Default(value = "600"))]
    pub width: u32,

    #[derivative(Default(value = "400"))]
    pub height: u32,

    /// Color of the first row
    #[derivative(Default(value = "Rgb([0, 0, 0])"))]
    pub top: Rgb<u8>,

    /// Color the gradient approaches on the last row
    #[derivative(Default(value = "Rgb([0, 0, 0])"))]
    pub bottom: Rgb<u8>,
}

impl GradientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_colors(width: u32, height: u32, top: Rgb<u8>, bottom: Rgb<u8>) -> Self {
        Self {
            width,
            height,
            top,
            bottom,
        }
    }
}

/// Opacity of the bottom color for each pixel: `255 * y / height`, constant along a row.
pub fn gradient_mask(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |_, y| {
        Luma([(255 * y as u64 / height as u64) as u8])
    })
}

/// Paint the bottom color over the top color through the row mask
pub fn create_gradient(config: &GradientConfig) -> CompositorResult<RgbImage> {
    if config.width == 0 || config.height == 0 {
        return Err(CompositorError::InvalidParameter(format!(
            "gradient size must be positive, got {}x{}",
            config.width, config.height
        )));
    }

    let mask = gradient_mask(config.width, config.height);
    let mut image = RgbImage::new(config.width, config.height);

    for (pixel, alpha) in image.pixels_mut().zip(mask.pixels()) {
        let m = alpha[0] as u32;
        for i in 0..3 {
            let top = config.top[i] as u32;
            let bottom = config.bottom[i] as u32;
            pixel[i] = ((top * (255 - m) + bottom * m + 127) / 255) as u8;
        }
    }

    log::debug!(
        "gradient {}x{} {:?} -> {:?}",
        config.width,
        config.height,
        config.top.0,
        config.bottom.0
    );

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_first_row_is_zero() {
        let mask = gradient_mask(600, 400);
        for x in 0..600 {
            assert_eq!(mask.get_pixel(x, 0)[0], 0);
        }
    }

    #[test]
    fn test_mask_monotonic() {
        let mask = gradient_mask(3, 400);
        let mut last = 0;
        for y in 0..400 {
            let value = mask.get_pixel(1, y)[0];
            assert!(value >= last, "row {y} decreased: {value} < {last}");
            last = value;
        }

        // 255 * 399 / 400
        assert_eq!(last, 254);
    }

    #[test]
    fn test_mask_constant_along_row() {
        let mask = gradient_mask(50, 10);
        for y in 0..10 {
            let first = mask.get_pixel(0, y)[0];
            assert!((0..50).all(|x| mask.get_pixel(x, y)[0] == first));
        }
    }

    #[test]
    fn test_gradient_endpoints() {
        let config = GradientConfig::from_colors(600, 400, Rgb([10, 60, 30]), Rgb([5, 30, 15]));
        let image = create_gradient(&config).unwrap();

        assert_eq!(image.dimensions(), (600, 400));
        assert_eq!(*image.get_pixel(0, 0), Rgb([10, 60, 30]));
        assert_eq!(*image.get_pixel(599, 0), Rgb([10, 60, 30]));

        // Last row is almost, but not exactly, the bottom color
        let last = image.get_pixel(0, 399);
        assert!((last[0] as i32 - 5).abs() <= 1);
        assert!((last[1] as i32 - 30).abs() <= 1);
        assert!((last[2] as i32 - 15).abs() <= 1);
    }

    #[test]
    fn test_gradient_midpoint() {
        let config = GradientConfig::new()
            .with_width(4)
            .with_height(2)
            .with_top(Rgb([0, 0, 0]))
            .with_bottom(Rgb([255, 255, 255]));
        let image = create_gradient(&config).unwrap();

        // mask = 255 * 1 / 2 = 127
        assert_eq!(*image.get_pixel(2, 1), Rgb([127, 127, 127]));
    }

    #[test]
    fn test_gradient_zero_size() {
        let config = GradientConfig::new().with_height(0);
        assert!(matches!(
            create_gradient(&config),
            Err(CompositorError::InvalidParameter(_))
        ));
    }
}
