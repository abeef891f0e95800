// Image decode/encode helpers for the API layer.
//
// Input bytes become an in-memory 3-channel RGB bitmap; processed bitmaps are
// sent back to clients as base64 PNG data URLs. Decoding enforces dimension
// and allocation caps so a small compressed payload cannot balloon into an
// unbounded buffer.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use image::{ImageFormat, ImageReader, Limits, RgbImage};
use tracing::debug;

use crate::error::ApiError;

// Decode-time resource caps, enforced per request.
const MAX_IMAGE_DIMENSION: u32 = 8192;
const MAX_DECODE_ALLOC_BYTES: u64 = 512 * 1024 * 1024;

fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_IMAGE_DIMENSION);
    limits.max_image_height = Some(MAX_IMAGE_DIMENSION);
    limits.max_alloc = Some(MAX_DECODE_ALLOC_BYTES);
    limits
}

// Map a multipart Content-Type hint to an image format. An image/* or
// octet-stream type without a known mapping falls back to content sniffing;
// a declared non-image type is rejected outright.
fn format_hint(content_type_str: Option<&str>) -> Result<Option<ImageFormat>, ApiError> {
    let media_type = content_type_str.map(|s| s[0..s.find(';').unwrap_or(s.len())].trim());

    match media_type {
        Some("image/jpeg") => Ok(Some(ImageFormat::Jpeg)),
        Some("image/png") => Ok(Some(ImageFormat::Png)),
        Some("image/webp") => Ok(Some(ImageFormat::WebP)),
        Some("image/bmp") => Ok(Some(ImageFormat::Bmp)),
        Some("image/x-bmp") => Ok(Some(ImageFormat::Bmp)),
        Some(declared)
            if !declared.starts_with("image/") && declared != "application/octet-stream" =>
        {
            Err(ApiError::UnsupportedMediaType(format!(
                "Content type '{}' is not supported",
                declared
            )))
        }
        _ => Ok(None),
    }
}

/// Decode uploaded bytes into a 3-channel RGB bitmap.
///
/// Empty payloads and bytes that are not a supported raster format are
/// client errors.
pub fn decode_input_image(
    file_data: &[u8],
    content_type_str: Option<&str>,
) -> Result<RgbImage, ApiError> {
    if file_data.is_empty() {
        return Err(ApiError::BadRequest("Empty image payload".to_string()));
    }

    let mut reader = ImageReader::new(Cursor::new(file_data));

    if let Some(format) = format_hint(content_type_str)? {
        reader.set_format(format);
    } else {
        reader = reader.with_guessed_format().map_err(|e| {
            ApiError::ImageDecodeError(format!("Failed to sniff image format: {}", e))
        })?;
        if reader.format().is_none() {
            return Err(ApiError::ImageDecodeError(
                "Unsupported image format".to_string(),
            ));
        }
    }

    reader.limits(decode_limits());

    let dyn_img = reader
        .decode()
        .map_err(|e| ApiError::ImageDecodeError(format!("Failed to decode image: {}", e)))?;

    debug!(
        "Input image decoded: {}x{} {:?}",
        dyn_img.width(),
        dyn_img.height(),
        dyn_img.color()
    );

    Ok(dyn_img.to_rgb8())
}

/// Encode a processed bitmap as a `data:image/png;base64,...` URL, directly
/// usable as an image source by web clients.
pub fn encode_data_url(image: &RgbImage) -> Result<String, ApiError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| ApiError::InternalServerError(format!("PNG encoding failed: {}", e)))?;

    Ok(format!(
        "data:image/png;base64,{}",
        BASE64_STANDARD.encode(buffer.into_inner())
    ))
}
