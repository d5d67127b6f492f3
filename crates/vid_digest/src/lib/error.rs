use std::fmt;

/// Pipeline stage a request was in when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Download,
    Transcription,
    Summarization,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Download => "download",
            Stage::Transcription => "transcription",
            Stage::Summarization => "summarization",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Download failed: {0}")]
    DownloadFailure(String),
    #[error("Transcription failed: {0}")]
    TranscriptionFailure(String),
    #[error("Summarization failed: {0}")]
    SummarizationFailure(String),
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::DownloadFailure(_) => Stage::Download,
            Error::TranscriptionFailure(_) => Stage::Transcription,
            Error::SummarizationFailure(_) => Stage::Summarization,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GROQ_API_KEY not set")]
    MissingApiKey,
    #[error("Invalid origin in allow-list: {0}")]
    InvalidOrigin(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_display_matches_wire_name() {
        for stage in [Stage::Download, Stage::Transcription, Stage::Summarization] {
            assert_eq!(
                serde_json::to_value(stage).unwrap(),
                serde_json::Value::String(stage.to_string())
            );
        }
    }
}
