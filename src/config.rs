// Transcript API configuration
//
// This module contains configuration structures and constants for the transcript API.
// It centralizes all configuration parameters and provides defaults from environment variables.

use std::env;

/// Default values for configuration
pub mod defaults {
    // Temporary working directory for media and intermediate audio files
    pub const TEMP_DIR: &str = "./tmp";

    // Directory holding the frontend static bundle
    pub const FRONTEND_DIR: &str = "./frontend";

    // External downloader command
    pub const YTDLP_CMD: &str = "yt-dlp";

    // External audio decoder command
    pub const FFMPEG_CMD: &str = "ffmpeg";

    // Default max upload size (512MB)
    pub const MAX_FILE_SIZE: usize = 536870912;

    // AssemblyAI API base URL
    pub const ASSEMBLYAI_BASE_URL: &str = "https://api.assemblyai.com";

    // Seconds between transcript status polls
    pub const POLL_INTERVAL_SECONDS: u64 = 3;
}

/// Configuration for the transcript API handlers
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Working directory for media and intermediate audio files
    pub temp_dir: String,
    /// Directory containing the frontend static assets
    pub frontend_dir: String,
    /// Maximum accepted upload size in bytes
    pub max_file_size: usize,
    /// Path to the yt-dlp command
    pub ytdlp_command: String,
    /// Path to the ffmpeg command
    pub ffmpeg_command: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            temp_dir: env::var("TRANSCRIPT_TMP_DIR")
                .unwrap_or_else(|_| String::from(defaults::TEMP_DIR)),
            frontend_dir: env::var("FRONTEND_DIR")
                .unwrap_or_else(|_| String::from(defaults::FRONTEND_DIR)),
            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::MAX_FILE_SIZE),
            ytdlp_command: env::var("YTDLP_CMD")
                .unwrap_or_else(|_| String::from(defaults::YTDLP_CMD)),
            ffmpeg_command: env::var("FFMPEG_CMD")
                .unwrap_or_else(|_| String::from(defaults::FFMPEG_CMD)),
        }
    }
}

impl AppConfig {
    /// Ensures the temporary working directory exists
    pub fn ensure_temp_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.temp_dir)
    }
}

/// Configuration for the AssemblyAI transcription client
#[derive(Clone, Debug)]
pub struct AssemblyAiConfig {
    /// API key used in the authorization header
    pub api_key: String,
    /// Base URL of the AssemblyAI API
    pub base_url: String,
    /// Seconds to wait between transcript status polls
    pub poll_interval_seconds: u64,
}

impl AssemblyAiConfig {
    /// Builds the client configuration from environment variables.
    ///
    /// The API key is required at process startup; its absence is a fatal
    /// configuration error rather than a per-request one.
    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("ASSEMBLYAI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                String::from(
                    "ASSEMBLYAI_API_KEY not set. Please set it in the environment or config file.",
                )
            })?;

        Ok(Self {
            api_key,
            base_url: env::var("ASSEMBLYAI_BASE_URL")
                .unwrap_or_else(|_| String::from(defaults::ASSEMBLYAI_BASE_URL)),
            poll_interval_seconds: env::var("ASSEMBLYAI_POLL_INTERVAL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::POLL_INTERVAL_SECONDS),
        })
    }
}
