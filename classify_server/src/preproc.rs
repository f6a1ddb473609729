//! Turn uploaded bytes into the tensor layout the classifier consumes.
//!
//! Images are squashed to the model resolution without preserving the aspect ratio, converted to
//! RGB and scaled to `[0, 1]`. The result is laid out as NHWC with a batch axis of size 1.
use image::{imageops::FilterType, ImageError, RgbImage};
use ndarray::{Array3, Array4, Axis};

/// Bicubic resampling.
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Decode any supported image format and drop alpha/palette information.
pub fn decode(bytes: &[u8]) -> Result<RgbImage, ImageError> {
    Ok(image::load_from_memory(bytes)?.to_rgb8())
}

/// Resize to `width` x `height` and normalize into a `height x width x 3` tensor.
pub fn pixel_tensor(image: &RgbImage, width: u32, height: u32) -> Array3<f32> {
    let resized: RgbImage = image::imageops::resize(image, width, height, RESIZE_FILTER);

    Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
        resized[(x as _, y as _)][c] as f32 / 255.0
    })
}

/// Prepend the batch axis expected by the model.
pub fn batch(pixels: Array3<f32>) -> Array4<f32> {
    pixels.insert_axis(Axis(0))
}

/// Full preprocessing from encoded bytes to a `1 x height x width x 3` batch.
pub fn preproc(bytes: &[u8], width: u32, height: u32) -> Result<Array4<f32>, ImageError> {
    let image = decode(bytes)?;
    log::debug!("Decoded image of {}x{}", image.width(), image.height());

    Ok(batch(pixel_tensor(&image, width, height)))
}
