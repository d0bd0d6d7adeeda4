//! Encoded-mask codec: RGBA images <-> PNG bytes <-> base64 data URIs.
//!
//! The editor emits masks as `data:image/png;base64,...` strings and the
//! job-submission side transmits the same payload verbatim, so every
//! conversion in this module is lossless with respect to pixel data.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use data_url::DataUrl;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::MaskOpError;

/// Prefix of every encoded mask produced by this crate.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode an RGBA image as PNG bytes.
pub fn png_bytes(image: &RgbaImage) -> Result<Vec<u8>, MaskOpError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(MaskOpError::Encode)?;
    Ok(bytes)
}

/// Encode an RGBA image as a base64 PNG data URI.
pub fn to_data_uri(image: &RgbaImage) -> Result<String, MaskOpError> {
    let bytes = png_bytes(image)?;
    Ok(format!("{PNG_DATA_URI_PREFIX}{}", BASE64.encode(bytes)))
}

/// Strip the data-URI prefix, leaving the raw base64 payload.
///
/// Payloads that carry no prefix are returned unchanged.
pub fn to_base64(payload: &str) -> &str {
    if !payload.starts_with("data:") {
        return payload;
    }
    match payload.split_once(',') {
        Some((_, b64)) => b64,
        None => payload,
    }
}

/// Decode a data URI into its raw payload bytes.
pub fn bytes_from_data_uri(payload: &str) -> Result<Vec<u8>, MaskOpError> {
    let url =
        DataUrl::process(payload).map_err(|e| MaskOpError::InvalidPayload(format!("{e:?}")))?;
    let (bytes, _fragment) = url
        .decode_to_vec()
        .map_err(|e| MaskOpError::InvalidPayload(format!("{e:?}")))?;
    Ok(bytes)
}

/// Decode an encoded mask into an RGBA image.
///
/// Accepts both full data URIs and bare base64 payloads; the submission
/// backend tolerates either form, so this codec does too.
pub fn decode(payload: &str) -> Result<RgbaImage, MaskOpError> {
    let bytes = if payload.starts_with("data:") {
        bytes_from_data_uri(payload)?
    } else {
        BASE64
            .decode(payload.trim())
            .map_err(|e| MaskOpError::InvalidPayload(e.to_string()))?
    };
    let image = image::load_from_memory(&bytes)?;
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn test_data_uri_round_trip() {
        let original = checker(8, 8);
        let uri = to_data_uri(&original).unwrap();
        assert!(uri.starts_with(PNG_DATA_URI_PREFIX));

        let decoded = decode(&uri).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoded.as_raw(), original.as_raw());
    }

    #[test]
    fn test_bare_base64_round_trip() {
        let original = checker(4, 4);
        let uri = to_data_uri(&original).unwrap();

        // Stripping the prefix must still decode to the same pixels.
        let bare = to_base64(&uri);
        assert!(!bare.starts_with("data:"));
        let decoded = decode(bare).unwrap();
        assert_eq!(decoded.as_raw(), original.as_raw());
    }

    #[test]
    fn test_to_base64_passthrough_without_prefix() {
        assert_eq!(to_base64("aGVsbG8="), "aGVsbG8=");
    }

    #[test]
    fn test_bytes_from_data_uri_matches_png_bytes() {
        let original = checker(4, 4);
        let uri = to_data_uri(&original).unwrap();
        let bytes = bytes_from_data_uri(&uri).unwrap();
        assert_eq!(bytes, png_bytes(&original).unwrap());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("not a mask at all!").is_err());
        assert!(decode("data:image/png;base64,%%%%").is_err());
        // Valid base64 that is not an image.
        assert!(decode("aGVsbG8gd29ybGQ=").is_err());
    }
}
