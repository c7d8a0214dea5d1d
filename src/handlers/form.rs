// Form data processing for the transcript API
//
// This module handles the extraction of multipart form data for media
// processing requests. A request carries either an uploaded media file or a
// URL to download, selected by the `is_url` flag.

use actix_multipart::Multipart;
use futures::{StreamExt, TryStreamExt};
use std::path::Path;

use crate::config::AppConfig;
use crate::downloader::validate_url;
use crate::error::ApiError;
use crate::media::is_supported_extension;

/// Source of the media to process, decoded from the multipart form
#[derive(Debug)]
pub enum MediaSource {
    /// Remote media to download with yt-dlp
    Url(String),
    /// Uploaded media file, validated and buffered
    Upload { filename: String, data: Vec<u8> },
}

/// Extract and validate multipart form data for media processing requests.
///
/// Recognized fields: `is_url` (`"true"` selects URL mode), `url_input`, and
/// `file_input` (file part). Unknown fields are drained and ignored.
pub async fn extract_form_data(
    mut form: Multipart,
    config: &AppConfig,
) -> Result<MediaSource, ApiError> {
    let mut is_url = false;
    let mut url_input = String::new();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(mut field)) = form.try_next().await {
        let content_disposition = field.content_disposition();
        let field_name = content_disposition
            .and_then(|cd| cd.get_name().map(|name| name.to_string()))
            .unwrap_or_default();

        match field_name.as_str() {
            "is_url" | "url_input" => {
                // Read text parameter
                let mut value = String::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| {
                        ApiError::invalid_input(format!(
                            "Error reading field {}: {}",
                            field_name, e
                        ))
                    })?;
                    if let Ok(s) = std::str::from_utf8(&chunk) {
                        value.push_str(s);
                    }
                }

                match field_name.as_str() {
                    "is_url" => is_url = value.trim() == "true",
                    "url_input" => url_input = value.trim().to_string(),
                    _ => {}
                }
            }
            "file_input" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|name| name.to_string()))
                    .unwrap_or_default();

                let mut total_size = 0;
                let mut file_data = Vec::new();

                while let Some(chunk) = field.next().await {
                    let data = chunk.map_err(|e| {
                        ApiError::invalid_input(format!("Error processing file upload: {}", e))
                    })?;

                    total_size += data.len();
                    if total_size > config.max_file_size {
                        return Err(ApiError::FileTooLarge(total_size, config.max_file_size));
                    }

                    file_data.extend_from_slice(&data);
                }

                upload = Some((filename, file_data));
            }
            _ => {
                // Skip unknown fields
                while field.next().await.is_some() {}
            }
        }
    }

    if is_url {
        validate_url(&url_input)?;
        return Ok(MediaSource::Url(url_input));
    }

    // Upload mode
    let (filename, data) =
        upload.ok_or_else(|| ApiError::invalid_input("No file part in the request."))?;
    if filename.is_empty() {
        return Err(ApiError::invalid_input("No selected file."));
    }

    let extension = Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !is_supported_extension(&extension) {
        return Err(ApiError::UnsupportedFormat(format!(".{}", extension)));
    }

    Ok(MediaSource::Upload { filename, data })
}
