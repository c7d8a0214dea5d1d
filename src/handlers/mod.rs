// Transcript API HTTP handlers
//
// This module contains the HTTP handlers for the transcript API.
// It provides the interface between HTTP requests and the media pipeline.

pub mod form;
pub mod routes;

// Re-export handlers for easier access
pub use self::routes::{process_media, serve_frontend, serve_index, serve_media};
