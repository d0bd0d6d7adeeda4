//! Source-image loading for the editor background layer.
//!
//! Loading suspends on the read and resolves to success-or-failure; a
//! failed load never takes the editor down, it only leaves the background
//! blank with `image_loaded() == false`.

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

/// Failure to produce a background image from a source reference.
#[derive(Debug, Error)]
pub enum SourceImageError {
    #[error("failed to read source image: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to decode source image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Load and decode a source image from disk.
pub async fn load_source_image(path: impl AsRef<Path>) -> Result<RgbaImage, SourceImageError> {
    let bytes = tokio::fs::read(path).await?;
    decode_source_image(&bytes)
}

/// Decode source-image bytes already in memory (e.g. fetched upstream).
pub fn decode_source_image(bytes: &[u8]) -> Result<RgbaImage, SourceImageError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}
