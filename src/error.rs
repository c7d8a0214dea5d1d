// Error handling for the transcript API
//
// This module defines error types and handling for the transcript API.
// It centralizes error definitions and maps each class to an HTTP response.

use std::io;

use thiserror::Error;

use actix_web::{HttpResponse, ResponseError};

use crate::models::ErrorResponse;

/// Errors that can occur while processing a media request
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad or missing form fields
    #[error("{0}")]
    InvalidInput(String),

    /// Error with an unsupported file extension
    #[error("Unsupported file format: {0}. Please upload a common audio or video file.")]
    UnsupportedFormat(String),

    /// Error when an upload exceeds the size limit
    #[error("File too large: {0} bytes exceeds limit of {1} bytes")]
    FileTooLarge(usize, usize),

    /// Error when saving or reading file data
    #[error("File error: {0}")]
    File(#[from] io::Error),

    /// Error while obtaining the media file (download or upload persistence)
    #[error("Failed to acquire media: {0}")]
    Acquisition(String),

    /// Error while extracting the audio track
    #[error("Failed to extract audio from media file: {0}")]
    Extraction(String),

    /// Error reported by or while reaching the transcription service
    #[error("Failed to transcribe media: {0}")]
    Transcription(String),

    /// Internal error that should be unreachable given upstream validation
    #[error("{0}")]
    Internal(String),

    /// Error when a requested media file does not exist
    #[error("Media file not found or accessible: {0}")]
    NotFound(String),

    /// Error when a path traversal attempt is detected
    #[error("Forbidden")]
    Forbidden,
}

impl ApiError {
    /// Create a new InvalidInput error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: self.to_string(),
        };

        match self {
            ApiError::InvalidInput(_) | ApiError::UnsupportedFormat(_) => {
                HttpResponse::BadRequest().json(error_response)
            }
            ApiError::FileTooLarge(_, _) => HttpResponse::PayloadTooLarge().json(error_response),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(error_response),
            // Traversal attempts get a bare response, nothing to leak
            ApiError::Forbidden => HttpResponse::Forbidden().body("Forbidden"),
            _ => HttpResponse::InternalServerError().json(error_response),
        }
    }
}
