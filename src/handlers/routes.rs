// API route handlers for the transcript API
//
// This module contains the route handlers for the transcript API: the media
// processing endpoint, the media-serving endpoint, and the static frontend
// routes.

use std::path::{Component, Path, PathBuf};

use actix_files::NamedFile;
use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use log::{error, info};

use crate::config::AppConfig;
use crate::downloader::download_online_media;
use crate::error::ApiError;
use crate::extractor::extract_audio;
use crate::file_utils::{cleanup_transcription_audio, sanitize_filename, save_file_data};
use crate::handlers::form::{extract_form_data, MediaSource};
use crate::media::{classify, MediaKind};
use crate::models::ProcessMediaResponse;
use crate::transcription::Transcriber;

/// Handler for media processing requests
///
/// Acquires the media (upload or URL download), extracts the audio track for
/// video inputs, sends the audio to the transcription service, and returns
/// the transcript together with a playable media URL. The intermediate audio
/// file is removed whatever the outcome; the acquired media file is kept so
/// it stays servable.
#[post("/api/process-media")]
pub async fn process_media(
    form: Multipart,
    config: web::Data<AppConfig>,
    transcriber: web::Data<dyn Transcriber>,
) -> Result<HttpResponse, ApiError> {
    config.ensure_temp_dir()?;

    let source = extract_form_data(form, &config).await?;

    let media_path = match source {
        MediaSource::Url(url) => download_online_media(&url, &config).await.map_err(|e| {
            error!("Download failed: {}", e);
            e
        })?,
        MediaSource::Upload { filename, data } => {
            let sanitized = sanitize_filename(&filename);
            if sanitized.is_empty() {
                return Err(ApiError::invalid_input("No selected file."));
            }
            let path = Path::new(&config.temp_dir).join(sanitized);
            save_file_data(&data, &path)?;
            info!("Uploaded file saved to: {}", path.display());
            path
        }
    };

    let media_url = media_serving_url(&media_path)?;

    // Audio inputs go to the transcription service as-is; video inputs get
    // their audio track extracted first.
    let audio_path = match classify(&media_path) {
        Some(MediaKind::Video) => extract_audio(&media_path, &config).await.map_err(|e| {
            error!("Audio extraction failed for {}: {}", media_path.display(), e);
            e
        })?,
        Some(MediaKind::Audio) => media_path.clone(),
        // Unreachable given upstream validation, kept as a defensive branch
        None => {
            return Err(ApiError::Internal(
                "File type could not be determined for transcription.".to_string(),
            ))
        }
    };

    let transcript = transcriber.transcribe(&audio_path).await;

    // Cleanup runs on success and failure alike, and never past the response
    cleanup_transcription_audio(&audio_path, &media_path);

    let transcript = transcript.map_err(|e| {
        error!("Transcription failed for {}: {}", audio_path.display(), e);
        e
    })?;

    Ok(HttpResponse::Ok().json(ProcessMediaResponse {
        video_path: media_url,
        transcript,
    }))
}

/// Compute the public serving URL of an acquired media file from its basename
fn media_serving_url(media_path: &Path) -> Result<String, ApiError> {
    let basename = media_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ApiError::Acquisition("acquired media file has no name".to_string()))?;
    Ok(format!("/media/{}", basename))
}

/// Handler serving processed media files from the working directory
///
/// Only the basename of the requested name is looked up, so directory
/// components cannot escape the working directory.
#[get("/media/{filename}")]
pub async fn serve_media(
    filename: web::Path<String>,
    config: web::Data<AppConfig>,
) -> Result<NamedFile, ApiError> {
    let requested = filename.into_inner();
    // The router leaves %2F encoded; decode before discarding directory
    // components so encoded traversal attempts reduce to a basename too
    let decoded = urlencoding::decode(&requested)
        .map_err(|_| ApiError::NotFound(requested.clone()))?
        .into_owned();
    let basename = Path::new(&decoded)
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| ApiError::NotFound(requested.clone()))?;

    let path = Path::new(&config.temp_dir).join(&basename);
    NamedFile::open_async(&path)
        .await
        .map_err(|_| ApiError::NotFound(basename.to_string_lossy().into_owned()))
}

/// Handler serving the frontend entry point
#[get("/")]
pub async fn serve_index(config: web::Data<AppConfig>) -> Result<NamedFile, ApiError> {
    let path = Path::new(&config.frontend_dir).join("index.html");
    NamedFile::open_async(&path)
        .await
        .map_err(|_| ApiError::NotFound("index.html".to_string()))
}

/// Handler serving frontend static assets
///
/// Rejects any request whose path contains parent-directory components or
/// whose resolved target escapes the frontend directory.
pub async fn serve_frontend(
    path: web::Path<String>,
    config: web::Data<AppConfig>,
) -> Result<NamedFile, ApiError> {
    let requested = path.into_inner();
    // Encoded separators survive routing; decode before the traversal check
    let decoded = urlencoding::decode(&requested)
        .map_err(|_| ApiError::NotFound(requested.clone()))?
        .into_owned();
    let relative = Path::new(&decoded);

    if relative.is_absolute()
        || relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(ApiError::Forbidden);
    }

    let full = Path::new(&config.frontend_dir).join(relative);

    // When the target exists, double-check its canonical form stays under
    // the frontend root (symlinks)
    if let (Ok(canonical), Ok(root)) = (
        full.canonicalize(),
        Path::new(&config.frontend_dir).canonicalize(),
    ) {
        if !canonical.starts_with(&root) {
            return Err(ApiError::Forbidden);
        }
    }

    NamedFile::open_async(&full)
        .await
        .map_err(|_| ApiError::NotFound(requested))
}
