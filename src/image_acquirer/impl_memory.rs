use crate::error::PredictionError;
use crate::image_acquirer::interface::{Image, ImageAcquirer};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Decodes an encoded image (PNG, JPEG, ...) already held in memory, such as
/// the bytes a gallery picker hands over.
pub struct ImageAcquirerMemory {
    bytes: Vec<u8>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageAcquirerMemory {
    pub fn new(bytes: Vec<u8>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            bytes,
            logger: logger.with_namespace("image_acquirer").with_namespace("memory"),
        }
    }
}

impl ImageAcquirer for ImageAcquirerMemory {
    fn acquire(&self) -> Result<Image, PredictionError> {
        let _ = self
            .logger
            .info(&format!("Decoding {} bytes", self.bytes.len()));

        let decoded = image::load_from_memory(&self.bytes)
            .map_err(|e| PredictionError::acquisition("could not decode image bytes", e))?;

        Image::new(decoded.to_rgb8())
    }
}
