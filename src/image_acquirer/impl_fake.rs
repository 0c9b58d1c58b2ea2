use crate::error::PredictionError;
use crate::image_acquirer::interface::{Image, ImageAcquirer};
use crate::library::logger::interface::Logger;
use image::{Rgb, RgbImage};
use std::sync::Arc;

/// Hands out a solid-colour image of a fixed size.
pub struct ImageAcquirerFake {
    width: u32,
    height: u32,
    color: [u8; 3],
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageAcquirerFake {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        width: u32,
        height: u32,
        color: [u8; 3],
    ) -> Self {
        Self {
            width,
            height,
            color,
            logger: logger.with_namespace("image_acquirer").with_namespace("fake"),
        }
    }
}

impl ImageAcquirer for ImageAcquirerFake {
    fn acquire(&self) -> Result<Image, PredictionError> {
        let _ = self.logger.info(&format!(
            "Producing {}x{} image of colour {:?}",
            self.width, self.height, self.color
        ));
        Image::new(RgbImage::from_pixel(
            self.width,
            self.height,
            Rgb(self.color),
        ))
    }
}
