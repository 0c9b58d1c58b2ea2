use crate::error::PredictionError;
use crate::image_acquirer::interface::{Image, ImageAcquirer};
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::Arc;

/// Decodes an image file from disk into a software RGB copy.
pub struct ImageAcquirerFile {
    path: PathBuf,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageAcquirerFile {
    pub fn new(path: impl Into<PathBuf>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            path: path.into(),
            logger: logger.with_namespace("image_acquirer").with_namespace("file"),
        }
    }
}

impl ImageAcquirer for ImageAcquirerFile {
    fn acquire(&self) -> Result<Image, PredictionError> {
        let _ = self
            .logger
            .info(&format!("Decoding {}", self.path.display()));

        let decoded = image::open(&self.path).map_err(|e| {
            PredictionError::acquisition(format!("could not decode {}", self.path.display()), e)
        })?;

        let image = Image::new(decoded.to_rgb8())?;
        let _ = self.logger.info(&format!(
            "Decoded {}x{} image",
            image.width(),
            image.height()
        ));

        Ok(image)
    }
}
