use image::DynamicImage;
use std::io::Cursor;
use thiserror::Error;

/// Gain applied to the red channel by the local transform.
pub const RED_GAIN: f32 = 1.10;
/// Gain applied to the green channel by the local transform.
pub const GREEN_GAIN: f32 = 1.05;

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("not a decodable image: {0}")]
    Decode(image::ImageError),

    #[error("failed to encode result: {0}")]
    Encode(image::ImageError),
}

/// Local stand-in for the remote colorization model.
///
/// Decodes the input, normalizes it to RGB, warms the red and green
/// channels by a fixed gain (clamped to the channel range) and leaves blue
/// untouched, then re-encodes as PNG. A pure function of the input bytes,
/// so the service keeps producing usable output when the remote endpoint
/// is down.
pub fn colorize_locally(bytes: &[u8]) -> Result<Vec<u8>, FallbackError> {
    let decoded = image::load_from_memory(bytes).map_err(FallbackError::Decode)?;
    let mut rgb = decoded.to_rgb8();

    for pixel in rgb.pixels_mut() {
        pixel[0] = apply_gain(pixel[0], RED_GAIN);
        pixel[1] = apply_gain(pixel[1], GREEN_GAIN);
    }

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut buffer, image::ImageOutputFormat::Png)
        .map_err(FallbackError::Encode)?;

    Ok(buffer.into_inner())
}

fn apply_gain(value: u8, gain: f32) -> u8 {
    (f32::from(value) * gain).round().min(255.0) as u8
}
