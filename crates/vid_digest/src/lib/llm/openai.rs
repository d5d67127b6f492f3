use std::path::Path;

use reqwest::{
    multipart::{Form, Part},
    Body, Client,
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use crate::{config::Config, Summarizer, SummaryResponse, TranscribeResponse, Transcriber};

/// Client for an OpenAI-compatible API (Groq by default) used for both
/// transcription and summarization
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    transcription_model: String,
    summarizer_model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Transcription response contained no text")]
    EmptyTranscript,
    #[error("Completion response contained no choices")]
    MissingCompletion,
}

impl OpenAIClient {
    const SUMMARY_PROMPT: &'static str = include_str!("./prompts/summarize.txt");
    pub const TEMPERATURE: f32 = 0.5;

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.groq.com/openai/v1".into(),
            transcription_model: "whisper-large-v3".into(),
            summarizer_model: "llama-3.1-70b-versatile".into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_key)
            .with_base_url(&config.api_base_url)
            .with_models(&config.transcription_model, &config.summarizer_model)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_models(
        mut self,
        transcription_model: impl Into<String>,
        summarizer_model: impl Into<String>,
    ) -> Self {
        self.transcription_model = transcription_model.into();
        self.summarizer_model = summarizer_model.into();
        self
    }

    pub fn summary_prompt(content: &str) -> String {
        format!("{}\n\n{content}", Self::SUMMARY_PROMPT.trim_end())
    }

    pub async fn send_transcribe_request(
        &self,
        audio_path: &Path,
    ) -> Result<TranscriptionBody, OpenAIError> {
        let file = tokio::fs::File::open(audio_path).await?;
        let len = file.metadata().await?.len();
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".into());

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), len)
            .file_name(file_name)
            .mime_str("audio/mpeg")?;

        let form = Form::new()
            .text("model", self.transcription_model.clone())
            .part("file", part);

        let resp = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<TranscriptionBody>().await?)
    }

    pub async fn send_completion_request(
        &self,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, OpenAIError> {
        let body = serde_json::json!({
            "model": self.summarizer_model,
            "messages": [
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ],
            "temperature": Self::TEMPERATURE
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct TranscriptionBody {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

impl Transcriber for OpenAIClient {
    type Error = OpenAIError;

    #[tracing::instrument(skip(self))]
    async fn transcribe(&self, audio_path: &Path) -> Result<TranscribeResponse, Self::Error> {
        let body = self
            .send_transcribe_request(audio_path)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to transcribe audio"))?;

        let text = body
            .text
            .filter(|text| !text.trim().is_empty())
            .ok_or(OpenAIError::EmptyTranscript)?;

        tracing::info!(chars = text.chars().count(), "Transcribed audio");
        Ok(TranscribeResponse { text })
    }
}

impl Summarizer for OpenAIClient {
    type Error = OpenAIError;

    #[tracing::instrument(skip_all, fields(chars = content.chars().count()))]
    async fn summarize(&self, content: &str) -> Result<SummaryResponse, Self::Error> {
        let response = self
            .send_completion_request(Self::summary_prompt(content))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        let summary = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(OpenAIError::MissingCompletion)?;

        Ok(SummaryResponse { summary })
    }
}
