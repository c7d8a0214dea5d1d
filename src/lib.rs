// Transcript API Library
//
// This crate provides an HTTP API that accepts an uploaded media file or a
// URL, stores the media in a working directory, extracts its audio track
// when needed, and returns a transcript from an external transcription
// service together with a playable media URL.

pub mod config;
pub mod config_loader;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod file_utils;
pub mod handlers;
pub mod media;
pub mod models;
pub mod transcription;

// Re-export common types for easier access
pub use config::{AppConfig, AssemblyAiConfig};
pub use error::ApiError;
pub use handlers::{process_media, serve_frontend, serve_index, serve_media};
pub use models::{ErrorResponse, ProcessMediaResponse};
pub use transcription::{AssemblyAiClient, Transcriber};
