// Main entry point for the beauty-editor-server application.
// Sets up the Tokio runtime, loads the process settings, configures the Axum
// router, and starts the HTTP server.

mod app;
mod error;
mod extract;
mod handlers;
mod image_codec;
mod listeners;
mod models;
mod pipeline;
mod settings;
mod shutdown_signal;

use clap::Parser;
use pipeline::{PassthroughPipeline, SharedPipeline};
use settings::Settings;
use std::sync::Arc;
use tracing::Level;

/// Command line arguments for beauty-editor-server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppConfig {
    /// Hostname/IP to bind the server to.
    /// If this option is specified without value, it will default to "*", meaning the server will listen on all interfaces.
    #[arg(long, env = "BEAUTY_SERVER_HOST", default_value = "localhost", num_args = 0..=1, default_missing_value = "*")]
    host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "BEAUTY_SERVER_PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Parse command line args and environment variables
    let config = AppConfig::parse();

    // Settings are read from the environment once and cached for the process
    // lifetime.
    let settings = Settings::get();

    // Initialize tracing subscriber for structured logging.
    // Logs will go to stdout.
    tracing_subscriber::fmt()
        .with_max_level(if settings.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(true) // Include module path in logs
        .with_file(true) // Include source file name
        .with_line_number(true) // Include line numbers
        .init();

    tracing::info!("Starting beauty-editor-server...");
    tracing::info!("Allowed CORS origins: {:?}", settings.allowed_origins);

    if settings.vertex_enabled && settings.vertex_project_id.is_some() {
        tracing::info!(
            "Pro-tier AI backend configured: project={:?}, location={}, model={}, timeout={}s",
            settings.vertex_project_id,
            settings.vertex_location,
            settings.vertex_model_name,
            settings.ai_pro_timeout
        );
    }
    if settings.gemini_api_key.is_some() {
        tracing::info!(
            "Lightweight AI model configured: model={}",
            settings.gemini_model_name
        );
    }

    // The beautification core is an external capability; until one is wired
    // in, the passthrough backend keeps the HTTP surface fully functional.
    let beauty_pipeline: SharedPipeline = Arc::new(PassthroughPipeline);
    tracing::warn!(
        "No beautification backend configured; running with the passthrough pipeline."
    );

    let app = app::create_app(beauty_pipeline, &settings.allowed_origins);

    let (addr, listener) = match listeners::create_listener(&config.host, config.port).await {
        Ok(bound) => bound,
        Err(e) => {
            tracing::error!("FATAL: Failed to bind to {}:{}: {}", config.host, config.port, e);
            eprintln!("FATAL: Could not bind server socket. See logs for details. Exiting.");
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal::shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server shut down cleanly.");
}
