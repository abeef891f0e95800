// Multipart form extraction for the beauty endpoints.
//
// Every endpoint takes the image in an `image` part; `apply` and
// `brighten-skin` carry additional text parts. All parts are collected in a
// single pass so field order on the wire does not matter.

use std::collections::HashMap;

use axum::{extract::Multipart, http::StatusCode};
use tracing::debug;

use crate::error::ApiError;

/// Raw upload: encoded bytes plus the Content-Type the client declared for
/// the part, if any.
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

/// Everything carried by one multipart request: the `image` part and the
/// remaining text fields by name.
pub struct FormParts {
    pub image: UploadedImage,
    pub fields: HashMap<String, String>,
}

pub async fn extract_form_parts(mut multipart: Multipart) -> Result<FormParts, ApiError> {
    let mut image: Option<UploadedImage> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to process multipart field"))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            debug!("Ignoring unnamed multipart field");
            continue;
        };

        if name == "image" {
            if image.is_some() {
                debug!("Multiple 'image' fields found, using the last one");
            }

            let content_type = field.content_type().map(str::to_string);
            debug!("Received image with content type: {:?}", content_type);

            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error(e, "Failed to read image data"))?
                .to_vec();

            image = Some(UploadedImage { data, content_type });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| multipart_error(e, &format!("Failed to read field '{}'", name)))?;
            fields.insert(name, value);
        }
    }

    let image = image.ok_or_else(|| {
        ApiError::BadRequest("Missing 'image' field in multipart request".to_string())
    })?;

    Ok(FormParts { image, fields })
}

fn multipart_error(error: axum::extract::multipart::MultipartError, context: &str) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Uploaded image exceeds the size limit".to_string())
    } else {
        ApiError::BadRequest(format!("{}: {}", context, error))
    }
}

impl FormParts {
    /// Numeric form field in [0, 100]. Accepts integer and float spellings;
    /// values outside the range are schema violations.
    pub fn slider_field(&self, name: &str, default: u8) -> Result<u8, ApiError> {
        let Some(raw) = self.fields.get(name) else {
            return Ok(default);
        };

        let value: f64 = raw.trim().parse().map_err(|_| {
            ApiError::BadRequest(format!("Field '{}' is not a number: '{}'", name, raw))
        })?;

        if !(0.0..=100.0).contains(&value) {
            return Err(ApiError::UnprocessableEntity(format!(
                "Field '{}' must be between 0 and 100, got {}",
                name, value
            )));
        }

        Ok(value.round() as u8)
    }

    /// Boolean form field with the usual HTML form spellings.
    pub fn bool_field(&self, name: &str, default: bool) -> Result<bool, ApiError> {
        let Some(raw) = self.fields.get(name) else {
            return Ok(default);
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(ApiError::BadRequest(format!(
                "Field '{}' is not a boolean: '{}'",
                name, other
            ))),
        }
    }

    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
