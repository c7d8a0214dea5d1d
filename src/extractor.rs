// Audio extraction for the transcript API
//
// This module wraps the external ffmpeg command used to pull the audio track
// out of a video file before transcription. Output is a mono 16kHz WAV file,
// the format the transcription service handles most reliably.

use std::path::{Path, PathBuf};

use log::{error, info};
use tokio::process::Command;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::file_utils::{remove_file_best_effort, unique_wav_path};

/// Target sample rate for the transcription service
const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Extract the audio track of a media file into a new mono 16kHz WAV file.
///
/// The output gets a generated unique name in the working directory. On any
/// decode failure the partial output file is removed and the ffmpeg error is
/// propagated.
pub async fn extract_audio(media_path: &Path, config: &AppConfig) -> Result<PathBuf, ApiError> {
    let audio_path = unique_wav_path(&config.temp_dir);

    let output = Command::new(&config.ffmpeg_command)
        .args(["-nostdin", "-y", "-i"])
        .arg(media_path)
        .args([
            "-vn",
            "-ac",
            "1",
            "-ar",
            &TARGET_SAMPLE_RATE.to_string(),
            "-acodec",
            "pcm_s16le",
        ])
        .arg(&audio_path)
        .output()
        .await
        .map_err(|e| {
            remove_partial_output(&audio_path);
            ApiError::Extraction(format!("failed to run ffmpeg: {}", e))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr_truncated: String = stderr.chars().take(1000).collect();
        error!(
            "ffmpeg failed for {}: {}",
            media_path.display(),
            stderr_truncated
        );
        remove_partial_output(&audio_path);
        return Err(ApiError::Extraction(format!(
            "ffmpeg failed: {}",
            stderr_truncated
        )));
    }

    info!("Extracted audio to: {}", audio_path.display());
    Ok(audio_path)
}

/// Remove a partially written output file after a failed extraction
fn remove_partial_output(audio_path: &Path) {
    if audio_path.exists() {
        remove_file_best_effort(audio_path);
    }
}
