// File utilities for the transcript API
//
// This module contains utility functions for file operations used across the
// request pipeline: filename sanitization, saving uploads, generating unique
// audio paths, best-effort cleanup, and the newest-file fallback scan used
// after URL downloads.

use log::{error, info};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use uuid::Uuid;

use crate::media;

/// Sanitize a user-supplied filename so it is safe to place in the working
/// directory.
///
/// Keeps word characters (alphanumeric and `_`), dots and hyphens, and
/// collapses runs of whitespace into a single underscore. Everything else is
/// stripped. The result may be empty; callers reject empty names.
pub fn sanitize_filename(filename: &str) -> String {
    // First drop disallowed characters, then collapse the remaining
    // whitespace runs. Order matters: stripping can merge two runs.
    let filtered: String = filename
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || c.is_whitespace() || *c == '_' || *c == '.' || *c == '-'
        })
        .collect();

    let mut sanitized = String::with_capacity(filtered.len());
    let mut in_whitespace = false;
    for c in filtered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
                in_whitespace = true;
            }
        } else {
            sanitized.push(c);
            in_whitespace = false;
        }
    }

    sanitized
}

/// Save uploaded file data to the filesystem
pub fn save_file_data(data: &[u8], file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(data)?;
    Ok(())
}

/// Generate a unique path for an extracted waveform file in the working
/// directory
pub fn unique_wav_path(temp_dir: &str) -> PathBuf {
    Path::new(temp_dir).join(format!("audio_{}.wav", Uuid::new_v4()))
}

/// Remove a file, logging failures instead of returning them.
///
/// Used on the response path where cleanup must never mask the request
/// outcome.
pub fn remove_file_best_effort(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        error!("Failed to clean up file {}: {}", path.display(), e);
    } else {
        info!("Cleaned up temp audio file: {}", path.display());
    }
}

/// Delete the intermediate transcription audio file after a request.
///
/// The processed media file must survive so it stays servable; the derived
/// audio file is only removed when it is a distinct path that still exists.
pub fn cleanup_transcription_audio(audio_path: &Path, media_path: &Path) {
    if audio_path != media_path && audio_path.exists() {
        remove_file_best_effort(audio_path);
    }
}

/// Find the most recently created file in the working directory with a
/// supported media extension.
///
/// Fallback resolution for downloads where the downloader did not report its
/// output path. Concurrent requests writing to the same directory can race
/// this scan; the reported path is always preferred.
pub fn newest_supported_file(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut best: Option<(PathBuf, SystemTime)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .map(media::is_supported_extension)
            .unwrap_or(false);
        if !supported {
            continue;
        }
        let meta = entry.metadata()?;
        let stamp = meta.created().or_else(|_| meta.modified())?;
        if best.as_ref().map(|(_, t)| stamp > *t).unwrap_or(true) {
            best = Some((path, stamp));
        }
    }

    Ok(best.map(|(p, _)| p))
}
