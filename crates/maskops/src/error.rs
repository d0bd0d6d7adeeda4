//! Error types for encoded-mask operations.

use thiserror::Error;

/// Errors produced while decoding, transforming, or re-encoding masks.
#[derive(Debug, Error)]
pub enum MaskOpError {
    #[error("no masks provided")]
    NoMasks,

    #[error("invalid mask payload: {0}")]
    InvalidPayload(String),

    #[error("failed to decode mask image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to encode mask image: {0}")]
    Encode(image::ImageError),

    #[error("decode task failed: {0}")]
    TaskJoin(String),
}
