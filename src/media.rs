// Media classification for the transcript API
//
// This module defines the supported media extensions and classifies acquired
// files as video (audio extraction required) or audio (sent to transcription
// as-is).

use std::path::Path;

/// Video extensions accepted for upload and URL downloads
pub const SUPPORTED_VIDEO_EXTS: [&str; 7] = ["mp4", "mkv", "avi", "mov", "webm", "flv", "wmv"];

/// Audio extensions accepted for upload and URL downloads
pub const SUPPORTED_AUDIO_EXTS: [&str; 7] = ["mp3", "wav", "flac", "ogg", "aac", "m4a", "opus"];

/// Kind of media file, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Video container, audio track must be extracted before transcription
    Video,
    /// Audio file, usable by the transcription service directly
    Audio,
}

/// Returns the lowercased extension of a path, if any
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Checks whether an extension (without dot) is in the supported set
pub fn is_supported_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    SUPPORTED_VIDEO_EXTS.contains(&ext.as_str()) || SUPPORTED_AUDIO_EXTS.contains(&ext.as_str())
}

/// Classifies a media file by its extension.
///
/// Returns `None` for unrecognized extensions. Upstream validation only
/// admits supported extensions, so callers treat `None` as an internal error.
pub fn classify(path: &Path) -> Option<MediaKind> {
    let ext = extension_of(path)?;
    if SUPPORTED_VIDEO_EXTS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else if SUPPORTED_AUDIO_EXTS.contains(&ext.as_str()) {
        Some(MediaKind::Audio)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn classify_video_extensions() {
        for ext in SUPPORTED_VIDEO_EXTS {
            let path = PathBuf::from(format!("clip.{}", ext));
            assert_eq!(classify(&path), Some(MediaKind::Video), "ext: {}", ext);
        }
    }

    #[test]
    fn classify_audio_extensions() {
        for ext in SUPPORTED_AUDIO_EXTS {
            let path = PathBuf::from(format!("clip.{}", ext));
            assert_eq!(classify(&path), Some(MediaKind::Audio), "ext: {}", ext);
        }
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(classify(Path::new("CLIP.MP4")), Some(MediaKind::Video));
        assert_eq!(classify(Path::new("voice.Mp3")), Some(MediaKind::Audio));
    }

    #[test]
    fn classify_rejects_unknown_extension() {
        assert_eq!(classify(Path::new("notes.txt")), None);
        assert_eq!(classify(Path::new("no_extension")), None);
    }

    #[test]
    fn supported_extension_check() {
        assert!(is_supported_extension("mp4"));
        assert!(is_supported_extension("OPUS"));
        assert!(!is_supported_extension("txt"));
    }
}
