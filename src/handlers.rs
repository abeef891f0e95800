// API handlers for the beauty endpoints.
//
// Handlers stay request-scoped: each decodes its own image, runs the pipeline
// via spawn_blocking (the backend is synchronous and CPU-bound) and discards
// everything once the response is serialized.

use axum::{Json, extract::Multipart, extract::State};
use serde_json::{Value, json};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{ApiError, beauty_config_json_error},
    extract::{FormParts, extract_form_parts},
    image_codec::{decode_input_image, encode_data_url},
    models::{BeautyConfig, BeautyResponse, FaceAnalysisResponse},
    pipeline::SharedPipeline,
};

const NO_FACE_DETAIL: &str = "Không phát hiện khuôn mặt hợp lệ";

// --- GET /health ---
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// --- POST /api/beauty/analyze ---
// Runs face detection only; no processing, no output image.
pub async fn analyze_face(
    State(pipeline): State<SharedPipeline>,
    multipart: Multipart,
) -> Result<Json<FaceAnalysisResponse>, ApiError> {
    let parts = extract_form_parts(multipart).await?;

    let meta = tokio::task::spawn_blocking(move || {
        let image = decode_input_image(&parts.image.data, parts.image.content_type.as_deref())?;
        pipeline.analyze(&image).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Analysis task failed: {}", e)))??;

    let meta = meta.ok_or_else(|| ApiError::NoFaceDetected(NO_FACE_DETAIL.to_string()))?;

    Ok(Json(FaceAnalysisResponse {
        face_meta: Some(meta),
    }))
}

// --- POST /api/beauty/apply ---
// Full beautification: image plus a JSON-encoded BeautyConfig form field.
pub async fn apply_beauty(
    State(pipeline): State<SharedPipeline>,
    multipart: Multipart,
) -> Result<Json<BeautyResponse>, ApiError> {
    let parts = extract_form_parts(multipart).await?;

    let raw_config = parts.text_field("beautyConfig").ok_or_else(|| {
        ApiError::BadRequest("Missing 'beautyConfig' field in multipart request".to_string())
    })?;

    let config: BeautyConfig =
        serde_json::from_str(raw_config).map_err(beauty_config_json_error)?;
    config.validate()?;

    run_pipeline(pipeline, parts, config).await.map(Json)
}

// --- POST /api/beauty/brighten-skin ---
// Convenience endpoint: builds a config with only `skinValues.whiten` set.
pub async fn brighten_skin(
    State(pipeline): State<SharedPipeline>,
    multipart: Multipart,
) -> Result<Json<BeautyResponse>, ApiError> {
    let parts = extract_form_parts(multipart).await?;

    let whiten = parts.slider_field("whiten", 50)?;
    let preserve_texture = parts.bool_field("preserveTexture", true)?;
    let adaptive_mode = parts.bool_field("adaptiveMode", true)?;

    // Accepted for wire compatibility with existing clients, but not part of
    // the BeautyConfig schema, so they never reach the pipeline.
    debug!(
        "brighten-skin flags accepted but not forwarded: preserveTexture={}, adaptiveMode={}",
        preserve_texture, adaptive_mode
    );

    let config = BeautyConfig::whiten_only(whiten);
    config.validate()?;

    run_pipeline(pipeline, parts, config).await.map(Json)
}

// Shared tail of the two processing endpoints: decode, apply, encode.
async fn run_pipeline(
    pipeline: SharedPipeline,
    parts: FormParts,
    config: BeautyConfig,
) -> Result<BeautyResponse, ApiError> {
    let request_id = Uuid::new_v4();
    info!(
        "Beauty apply request: request_id={}, image_bytes={}",
        request_id,
        parts.image.data.len()
    );

    let (image, meta) = tokio::task::spawn_blocking(move || {
        let image = decode_input_image(&parts.image.data, parts.image.content_type.as_deref())?;
        let (processed, meta) = pipeline.apply(&image, &config)?;
        let data_url = encode_data_url(&processed)?;
        Ok::<_, ApiError>((data_url, meta))
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Processing task failed: {}", e)))??;

    debug!("Beauty apply completed: request_id={}", request_id);

    Ok(BeautyResponse {
        image,
        face_meta: meta,
    })
}
