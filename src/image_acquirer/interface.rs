use crate::error::PredictionError;
use image::RgbImage;

/// A decoded, software-backed RGB image with non-zero dimensions.
///
/// Acquirers are responsible for converting whatever the source hands them
/// (alpha, 16-bit, grayscale, palette) into this form. Everything downstream
/// reads pixels directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pixels: RgbImage,
}

impl Image {
    pub fn new(pixels: RgbImage) -> Result<Self, PredictionError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(PredictionError::acquisition(
                "image has no pixels",
                format!("dimensions {}x{}", pixels.width(), pixels.height()),
            ));
        }

        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGB triple at (row, col).
    pub fn pixel(&self, row: u32, col: u32) -> [u8; 3] {
        self.pixels.get_pixel(col, row).0
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }
}

pub trait ImageAcquirer {
    fn acquire(&self) -> Result<Image, PredictionError>;
}
