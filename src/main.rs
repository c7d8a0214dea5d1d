use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};

// Import our modules
mod config;
mod config_loader;
mod downloader;
mod error;
mod extractor;
mod file_utils;
mod handlers;
mod media;
mod models;
mod transcription;

// Import the types we need
use config::{AppConfig, AssemblyAiConfig};
use handlers::{process_media, serve_frontend, serve_index, serve_media};
use transcription::{AssemblyAiClient, Transcriber};

const DEFAULT_TRANSCRIPT_API_HOST: &str = "127.0.0.1";
const DEFAULT_TRANSCRIPT_API_PORT: &str = "5000";
const DEFAULT_TRANSCRIPT_API_TIMEOUT: u64 = 480;
const DEFAULT_TRANSCRIPT_API_KEEPALIVE: u64 = 480;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Merge optional config file into the environment
    config_loader::load_config();

    // Load configurations
    let app_config = AppConfig::default();

    // A missing transcription API key is a startup error, not a per-request one
    let assemblyai_config = match AssemblyAiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    // Create the working directory if it doesn't exist
    if let Err(e) = app_config.ensure_temp_dir() {
        warn!(
            "Failed to create temp directory {}: {}",
            app_config.temp_dir, e
        );
    }

    let transcriber: Arc<dyn Transcriber> = Arc::new(AssemblyAiClient::new(assemblyai_config));
    let transcriber = web::Data::from(transcriber);

    // Server settings
    let host = std::env::var("TRANSCRIPT_API_HOST")
        .unwrap_or_else(|_| DEFAULT_TRANSCRIPT_API_HOST.to_string());
    let port = std::env::var("TRANSCRIPT_API_PORT")
        .unwrap_or_else(|_| DEFAULT_TRANSCRIPT_API_PORT.to_string());
    let timeout = std::time::Duration::from_secs(
        std::env::var("TRANSCRIPT_API_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TRANSCRIPT_API_TIMEOUT),
    );
    let keep_alive = std::time::Duration::from_secs(
        std::env::var("TRANSCRIPT_API_KEEPALIVE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TRANSCRIPT_API_KEEPALIVE),
    );

    info!("Starting transcript API server on http://{}:{}", host, port);
    info!("Using temp directory: {}", app_config.temp_dir);
    info!("Serving frontend from: {}", app_config.frontend_dir);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(app_config.clone()))
            .app_data(transcriber.clone())
            .service(process_media)
            .service(serve_media)
            .service(serve_index)
            // Catch-all for frontend assets, registered last
            .service(web::resource("/{path:.*}").route(web::get().to(serve_frontend)))
    })
    .bind(format!("{}:{}", host, port))?
    .client_disconnect_timeout(timeout)
    .keep_alive(keep_alive)
    .run()
    .await
}
