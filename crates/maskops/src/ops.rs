//! Mask algebra over encoded masks.
//!
//! Each operation decodes its payload(s), transforms pixels, and re-encodes
//! the result as a PNG data URI. Decoding is the only suspension point:
//! the pixel work runs on the blocking pool and the caller awaits
//! success-or-failure, with no cancellation or timeout.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::codec;
use crate::error::MaskOpError;

/// Default edge-softening blur radius in pixels.
pub const DEFAULT_BLUR_RADIUS: f32 = 5.0;

/// Decode `payload`, apply `op`, re-encode. Shared by the single-input
/// operations below.
async fn transform<F>(payload: String, op: F) -> Result<String, MaskOpError>
where
    F: FnOnce(RgbaImage) -> RgbaImage + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let image = codec::decode(&payload)?;
        codec::to_data_uri(&op(image))
    })
    .await
    .map_err(|e| MaskOpError::TaskJoin(e.to_string()))?
}

/// Reduce a painted mask to a strict binary grayscale mask.
///
/// A pixel with any alpha becomes white; everything else becomes black.
/// The output is fully opaque regardless of input color, which is the
/// form the generation backend expects.
pub async fn to_grayscale_mask(mask: &str) -> Result<String, MaskOpError> {
    transform(mask.to_owned(), |image| {
        let mut out = RgbaImage::new(image.width(), image.height());
        for (src, dst) in image.pixels().zip(out.pixels_mut()) {
            let value = if src[3] > 0 { 255 } else { 0 };
            dst[0] = value;
            dst[1] = value;
            dst[2] = value;
            dst[3] = 255;
        }
        out
    })
    .await
}

/// Invert a mask (swap black and white).
///
/// Negates the RGB channels and preserves alpha, so the operation is an
/// involution: `invert(invert(m))` reproduces `m`.
pub async fn invert(mask: &str) -> Result<String, MaskOpError> {
    transform(mask.to_owned(), |mut image| {
        for pixel in image.pixels_mut() {
            pixel[0] = 255 - pixel[0];
            pixel[1] = 255 - pixel[1];
            pixel[2] = 255 - pixel[2];
        }
        image
    })
    .await
}

/// Resize a mask to the target dimensions.
///
/// Nearest-neighbor only: smoothing would introduce gray edge values into
/// what must remain a hard mask boundary when the mask resolution differs
/// from the generation resolution.
pub async fn resize(
    mask: &str,
    target_width: u32,
    target_height: u32,
) -> Result<String, MaskOpError> {
    transform(mask.to_owned(), move |image| {
        debug!(
            "resize mask {}x{} -> {}x{}",
            image.width(),
            image.height(),
            target_width,
            target_height
        );
        imageops::resize(&image, target_width, target_height, FilterType::Nearest)
    })
    .await
}

/// Combine masks into their union.
///
/// Fails fast with [`MaskOpError::NoMasks`] on an empty input, before any
/// decode attempt. The first mask's dimensions define the canvas; every
/// mask is composited additively ("lighter"), so a pixel belongs to the
/// union iff it is non-zero in any input. The operator is commutative and
/// saturating, so compositing order does not matter.
pub async fn combine(masks: &[String]) -> Result<String, MaskOpError> {
    if masks.is_empty() {
        return Err(MaskOpError::NoMasks);
    }

    let masks = masks.to_vec();
    tokio::task::spawn_blocking(move || {
        let mut decoded = Vec::with_capacity(masks.len());
        for mask in &masks {
            decoded.push(codec::decode(mask)?);
        }

        let (width, height) = decoded[0].dimensions();
        let mut canvas = RgbaImage::new(width, height);
        for mask in &decoded {
            for (x, y, pixel) in mask.enumerate_pixels() {
                if x >= width || y >= height {
                    continue;
                }
                let dst = canvas.get_pixel_mut(x, y);
                for channel in 0..4 {
                    dst[channel] = dst[channel].saturating_add(pixel[channel]);
                }
            }
        }
        codec::to_data_uri(&canvas)
    })
    .await
    .map_err(|e| MaskOpError::TaskJoin(e.to_string()))?
}

/// Blur mask edges for smoother generation transitions.
///
/// Gaussian blur with the given pixel radius (sigma). A non-positive
/// radius re-encodes the mask unchanged.
pub async fn blur(mask: &str, radius: f32) -> Result<String, MaskOpError> {
    transform(mask.to_owned(), move |image| {
        if radius <= 0.0 {
            return image;
        }
        imageops::blur(&image, radius)
    })
    .await
}
