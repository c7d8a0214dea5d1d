// Online media download for the transcript API
//
// This module wraps the external yt-dlp command used for URL-mode requests.
// The downloader keeps the original media artifact in the working directory
// so it can be served for playback after transcription.

use std::path::{Path, PathBuf};

use log::{info, warn};
use tokio::process::Command;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::file_utils::newest_supported_file;

/// Validate that a string looks like a URL.
/// Rejects anything that isn't http:// or https://.
pub fn validate_url(url: &str) -> Result<(), ApiError> {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(())
    } else {
        Err(ApiError::invalid_input("Please provide a valid URL."))
    }
}

/// Download a media file from a URL using yt-dlp.
///
/// Returns the path of the downloaded file inside the working directory.
/// yt-dlp is asked to print its final output path (`--print
/// after_move:filepath`); only when nothing is printed does resolution fall
/// back to scanning the working directory for the newest supported file.
///
/// # Security
/// - URL is validated to start with http:// or https://
/// - Arguments are passed via `.arg()` (no shell expansion)
/// - `--no-exec` prevents yt-dlp from running post-processing commands
pub async fn download_online_media(url: &str, config: &AppConfig) -> Result<PathBuf, ApiError> {
    validate_url(url)?;

    info!("Processing URL: {}", url);

    let output_template = Path::new(&config.temp_dir)
        .join("%(id)s_%(title)s.%(ext)s")
        .to_str()
        .ok_or_else(|| {
            ApiError::Acquisition("working directory path contains invalid UTF-8".into())
        })?
        .to_string();

    let output = Command::new(&config.ytdlp_command)
        .args([
            "--format",
            "best",
            "--no-playlist",
            "--keep-video",
            "--no-write-thumbnail",
            "--quiet",
            "--no-warnings",
            "--no-cache-dir",
            "--no-exec",
            "--output",
            &output_template,
            "--print",
            "after_move:filepath",
        ])
        .arg(url)
        .output()
        .await
        .map_err(|e| ApiError::Acquisition(format!("failed to run yt-dlp: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Limit error message length to avoid dumping huge stderr
        let stderr_truncated: String = stderr.chars().take(1000).collect();
        return Err(ApiError::Acquisition(format!(
            "Failed to download media from URL. It might be private, geo-restricted, \
             or unsupported. yt-dlp error: {}",
            stderr_truncated
        )));
    }

    let reported = String::from_utf8_lossy(&output.stdout).trim().to_string();

    let downloaded = if !reported.is_empty() && Path::new(&reported).exists() {
        PathBuf::from(reported)
    } else {
        warn!(
            "Downloader did not report an output path for {}. Searching working directory.",
            url
        );
        newest_supported_file(Path::new(&config.temp_dir))?.ok_or_else(|| {
            ApiError::Acquisition(
                "Failed to find downloaded media file after extraction.".to_string(),
            )
        })?
    };

    if !downloaded.exists() {
        return Err(ApiError::Acquisition(format!(
            "downloaded file not found at {}",
            downloaded.display()
        )));
    }

    info!("Successfully downloaded: {}", downloaded.display());
    Ok(downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_url_accepts_http_and_https() {
        assert!(validate_url("https://youtube.com/watch?v=abc").is_ok());
        assert!(validate_url("http://example.com/clip.mp4").is_ok());
    }

    #[test]
    fn validate_url_rejects_empty_and_schemeless() {
        assert!(validate_url("").is_err());
        assert!(validate_url("youtube.com/watch?v=abc").is_err());
    }

    #[test]
    fn validate_url_rejects_other_schemes() {
        assert!(validate_url("file:///etc/passwd").is_err());
        assert!(validate_url("ftp://example.com/a.mp4").is_err());
    }
}
