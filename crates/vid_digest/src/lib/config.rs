use std::{net::SocketAddr, path::PathBuf};

use axum::http::HeaderValue;
use clap::{Parser, ValueEnum};

use crate::error::ConfigError;

/// What to do when summarizing a single chunk fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ChunkFailurePolicy {
    /// Fail the whole request
    #[default]
    Abort,
    /// Substitute a bracketed error marker for that chunk and keep going
    InlineMarker,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "vid-digest", about = "Video audio transcription and summary service")]
pub struct Cli {
    /// Bearer token for the speech-to-text and chat-completion endpoints
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "API_BASE_URL", default_value = "https://api.groq.com/openai/v1")]
    pub api_base_url: String,

    #[arg(long, env = "TRANSCRIPTION_MODEL", default_value = "whisper-large-v3")]
    pub transcription_model: String,

    #[arg(long, env = "SUMMARIZER_MODEL", default_value = "llama-3.1-70b-versatile")]
    pub summarizer_model: String,

    /// Path to yt-dlp cookies file
    #[arg(long, env = "YTDLP_COOKIES_PATH")]
    pub cookies_path: Option<PathBuf>,

    /// Pass --no-check-certificates to yt-dlp
    #[arg(
        long,
        env = "YTDLP_NO_CHECK_CERTIFICATES",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub no_check_certificates: bool,

    /// Working directory for audio files
    #[arg(long, env = "WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Maximum transcript characters per summarization request, 0 disables chunking
    #[arg(long, env = "CHUNK_MAX_CHARS", default_value = "5000")]
    pub chunk_max_chars: usize,

    #[arg(long, env = "CHUNK_FAILURE_POLICY", value_enum, default_value = "abort")]
    pub chunk_failure_policy: ChunkFailurePolicy,

    /// Origins allowed to call the service from a browser
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://127.0.0.1:5500"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: SocketAddr,

    /// Sentry DSN, error reporting is off when unset
    #[arg(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

/// Process configuration, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub transcription_model: String,
    pub summarizer_model: String,
    pub cookies_path: Option<PathBuf>,
    pub no_check_certificates: bool,
    pub workdir: PathBuf,
    pub chunk_max_chars: Option<usize>,
    pub chunk_failure_policy: ChunkFailurePolicy,
    pub allowed_origins: Vec<HeaderValue>,
    pub bind_addr: SocketAddr,
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let api_key = cli
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let allowed_origins = cli
            .allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Config {
            api_key,
            api_base_url: cli.api_base_url,
            transcription_model: cli.transcription_model,
            summarizer_model: cli.summarizer_model,
            cookies_path: cli.cookies_path,
            no_check_certificates: cli.no_check_certificates,
            workdir: cli.workdir.unwrap_or_else(std::env::temp_dir),
            chunk_max_chars: (cli.chunk_max_chars > 0).then_some(cli.chunk_max_chars),
            chunk_failure_policy: cli.chunk_failure_policy,
            allowed_origins,
            bind_addr: cli.bind_addr,
        })
    }
}
