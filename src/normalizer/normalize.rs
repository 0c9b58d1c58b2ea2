use crate::image_acquirer::interface::Image;
use crate::normalizer::tensor::{Tensor, CHANNELS};
use image::imageops::{self, FilterType};
use image::RgbImage;
use std::num::NonZeroU32;

/// Stretches `image` to `target_size x target_size` with a bilinear filter and
/// packs it into a `[0, 1]` RGB tensor.
pub fn normalize(image: &Image, target_size: NonZeroU32) -> Tensor {
    normalize_with_filter(image, target_size, FilterType::Triangle)
}

pub fn normalize_with_filter(image: &Image, target_size: NonZeroU32, filter: FilterType) -> Tensor {
    let resized = resize_image(image, target_size.get(), filter);
    image_to_tensor(&resized)
}

/// Non-aspect-preserving resize to a square.
pub fn resize_image(image: &Image, size: u32, filter: FilterType) -> RgbImage {
    if image.width() == size && image.height() == size {
        return image.as_rgb().clone();
    }

    imageops::resize(image.as_rgb(), size, size, filter)
}

fn image_to_tensor(rgb: &RgbImage) -> Tensor {
    let side = rgb.width() as usize;
    let mut data = Vec::with_capacity(side * side * CHANNELS);

    // `pixels()` walks rows top to bottom, left to right within a row.
    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;
        data.push(r as f32 / 255.0);
        data.push(g as f32 / 255.0);
        data.push(b as f32 / 255.0);
    }

    Tensor::new(side, data)
}
