// Transcript API data models
//
// This module contains the data models used for the transcript API.
// It includes the response types returned by the HTTP endpoints.

use serde::Serialize;

/// Response for a successfully processed media request
#[derive(Serialize)]
pub struct ProcessMediaResponse {
    /// Public URL under which the processed media file can be played back
    pub video_path: String,
    /// Transcript text returned by the transcription service
    pub transcript: String,
}

/// Error response for API
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
