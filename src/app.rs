// Router assembly for the beauty editor API.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::Level;

use crate::{handlers, pipeline::SharedPipeline};

// Maximum allowed size for image upload requests
pub const MAX_IMAGE_SIZE_BYTES: usize = 25 * 1024 * 1024; // 25MB

pub fn create_app(pipeline: SharedPipeline, allowed_origins: &[String]) -> Router {
    // Configure the router with all API endpoints
    Router::new()
        .route("/health", get(handlers::health))
        // Beauty operations
        .route("/api/beauty/analyze", post(handlers::analyze_face))
        .route("/api/beauty/apply", post(handlers::apply_beauty))
        .route("/api/beauty/brighten-skin", post(handlers::brighten_skin))
        // Apply a layer to limit the maximum size of request bodies
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE_BYTES))
        // CORS restricted to the configured origin list
        .layer(cors_layer(allowed_origins))
        // Add tracing for HTTP requests and responses
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        // Provide the shared state
        .with_state(pipeline)
}

// Credentials are allowed, so methods and headers mirror the request instead
// of using a wildcard.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = Vec::with_capacity(allowed_origins.len());
    for origin in allowed_origins {
        match origin.parse() {
            Ok(value) => origins.push(value),
            Err(_) => tracing::warn!("Ignoring malformed CORS origin: {:?}", origin),
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
