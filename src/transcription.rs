// Transcription client for the transcript API
//
// This module defines the transcription seam and the AssemblyAI client used
// in production. The client uploads the audio file, creates a transcript job
// and polls until the service reports a terminal status.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::AssemblyAiConfig;
use crate::error::ApiError;

/// Abstraction over the external speech-to-text service.
///
/// The production implementation talks to AssemblyAI; tests substitute a stub
/// returning a fixed transcript.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Submit an audio file and block until a terminal status is reached.
    /// Returns the transcript text on success.
    async fn transcribe(&self, audio_path: &Path) -> Result<String, ApiError>;
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Serialize)]
struct TranscriptRequest<'a> {
    audio_url: &'a str,
}

#[derive(Deserialize)]
struct TranscriptStatus {
    id: String,
    status: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// AssemblyAI HTTP client
pub struct AssemblyAiClient {
    client: reqwest::Client,
    config: AssemblyAiConfig,
}

impl AssemblyAiClient {
    pub fn new(config: AssemblyAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Upload raw audio bytes, returning the service-side URL of the upload
    async fn upload(&self, audio_path: &Path) -> Result<String, ApiError> {
        let data = tokio::fs::read(audio_path).await.map_err(|e| {
            ApiError::Transcription(format!("failed to read audio file: {}", e))
        })?;

        let response = self
            .client
            .post(format!("{}/v2/upload", self.config.base_url))
            .header("authorization", &self.config.api_key)
            .body(data)
            .send()
            .await
            .map_err(|e| ApiError::Transcription(format!("upload request: {}", e)))?;

        let response = check_status(response).await?;
        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Transcription(format!("upload response: {}", e)))?;

        Ok(upload.upload_url)
    }

    /// Create a transcript job for an uploaded audio URL
    async fn create_transcript(&self, audio_url: &str) -> Result<TranscriptStatus, ApiError> {
        let response = self
            .client
            .post(format!("{}/v2/transcript", self.config.base_url))
            .header("authorization", &self.config.api_key)
            .json(&TranscriptRequest { audio_url })
            .send()
            .await
            .map_err(|e| ApiError::Transcription(format!("create request: {}", e)))?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Transcription(format!("create response: {}", e)))
    }

    /// Fetch the current status of a transcript job
    async fn poll_transcript(&self, id: &str) -> Result<TranscriptStatus, ApiError> {
        let response = self
            .client
            .get(format!("{}/v2/transcript/{}", self.config.base_url, id))
            .header("authorization", &self.config.api_key)
            .send()
            .await
            .map_err(|e| ApiError::Transcription(format!("poll request: {}", e)))?;

        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Transcription(format!("poll response: {}", e)))
    }
}

/// Map non-success HTTP statuses to a transcription error carrying the body
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(ApiError::Transcription(format!(
        "service returned status {}: {}",
        status, body
    )))
}

#[async_trait]
impl Transcriber for AssemblyAiClient {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, ApiError> {
        let audio_url = self.upload(audio_path).await?;
        debug!("Uploaded {} for transcription", audio_path.display());

        let mut transcript = self.create_transcript(&audio_url).await?;
        let id = transcript.id.clone();

        // Poll until the service reaches a terminal status. No retry logic:
        // a network failure mid-poll fails the request.
        loop {
            match transcript.status.as_str() {
                "completed" => {
                    info!("Transcription successful.");
                    return Ok(transcript.text.unwrap_or_default());
                }
                "error" => {
                    let message = transcript
                        .error
                        .unwrap_or_else(|| "Unknown transcription error.".to_string());
                    return Err(ApiError::Transcription(format!(
                        "transcription failed: {}",
                        message
                    )));
                }
                status => {
                    debug!("Transcript {} status: {}", id, status);
                }
            }

            tokio::time::sleep(Duration::from_secs(self.config.poll_interval_seconds)).await;
            transcript = self.poll_transcript(&id).await?;
        }
    }
}
