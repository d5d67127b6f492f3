pub mod builder;

use std::path::PathBuf;

use itertools::Itertools;

use crate::{
    chunker::chunk_text,
    config::ChunkFailurePolicy,
    error::Error,
    yt::{AudioArtifact, AudioHandler},
    Summarizer, Transcriber,
};

/// Where a request currently is. Failures short-circuit out of the loop in
/// [`SummaryPipeline::run`]; the artifact guard is dropped on every exit.
enum PipelineState {
    Downloading,
    Transcribing,
    Summarizing { transcript: String },
    Done { summary: String },
}

impl PipelineState {
    fn name(&self) -> &'static str {
        match self {
            PipelineState::Downloading => "downloading",
            PipelineState::Transcribing => "transcribing",
            PipelineState::Summarizing { .. } => "summarizing",
            PipelineState::Done { .. } => "done",
        }
    }
}

/// Download -> transcribe -> summarize for a single video url
#[derive(Debug)]
pub struct SummaryPipeline<A, T, S>
where
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    workdir: PathBuf,
    audio_handler: A,
    transcriber: T,
    summarizer: S,
    /// `None` sends the whole transcript in one request
    chunk_max_chars: Option<usize>,
    chunk_failure_policy: ChunkFailurePolicy,
}

impl<A, T, S> SummaryPipeline<A, T, S>
where
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    #[tracing::instrument(skip(self), fields(request_id = tracing::field::Empty))]
    pub async fn run(&self, url: &str) -> Result<String, Error> {
        let artifact = AudioArtifact::reserve(&self.workdir)
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to create audio directory"))
            .map_err(|e| Error::DownloadFailure(format!("could not prepare workdir: {e}")))?;
        tracing::Span::current().record("request_id", tracing::field::display(artifact.id()));

        let mut state = PipelineState::Downloading;
        loop {
            tracing::debug!(state = state.name(), "Advancing pipeline");
            state = match state {
                PipelineState::Downloading => {
                    self.download_audio(url, &artifact).await?;
                    PipelineState::Transcribing
                }
                PipelineState::Transcribing => PipelineState::Summarizing {
                    transcript: self.transcribe(&artifact).await?,
                },
                PipelineState::Summarizing { transcript } => PipelineState::Done {
                    summary: self.summarize_transcript(&transcript).await?,
                },
                PipelineState::Done { summary } => {
                    tracing::info!(chars = summary.chars().count(), "Summary ready");
                    return Ok(summary);
                }
            };
        }
    }

    async fn download_audio(&self, url: &str, artifact: &AudioArtifact) -> Result<(), Error> {
        self.audio_handler
            .download(url, artifact)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to download audio"))
            .map_err(|e| Error::DownloadFailure(e.to_string()))?;

        // a handler reporting success without a file is still a failed download
        if !artifact.path().exists() {
            return Err(Error::DownloadFailure(format!(
                "no audio file at {}",
                artifact.path().display()
            )));
        }
        Ok(())
    }

    async fn transcribe(&self, artifact: &AudioArtifact) -> Result<String, Error> {
        let response = self
            .transcriber
            .transcribe(artifact.path())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to transcribe audio"))
            .map_err(|e| Error::TranscriptionFailure(e.to_string()))?;

        if response.text.trim().is_empty() {
            tracing::error!("Transcription returned no text");
            return Err(Error::TranscriptionFailure("transcript is empty".into()));
        }
        Ok(response.text)
    }

    /// Summarizes the transcript directly, or chunk by chunk when chunking is
    /// enabled and the transcript does not fit in one chunk
    #[tracing::instrument(skip_all, fields(chars = transcript.chars().count()))]
    async fn summarize_transcript(&self, transcript: &str) -> Result<String, Error> {
        let chunks = match self.chunk_max_chars {
            Some(max_chars) => chunk_text(transcript, max_chars),
            None => vec![transcript],
        };

        if let [single] = chunks.as_slice() {
            return self
                .summarizer
                .summarize(single)
                .await
                .map(|resp| resp.summary)
                .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize transcript"))
                .map_err(|e| Error::SummarizationFailure(e.to_string()));
        }

        let total = chunks.len();
        tracing::info!(chunks = total, "Summarizing transcript in chunks");

        let mut summaries = Vec::with_capacity(total);
        for (idx, chunk) in chunks.iter().enumerate() {
            let number = idx + 1;
            let result = self.summarizer.summarize(chunk).await;
            match result {
                Ok(resp) => summaries.push(resp.summary),
                Err(e) => {
                    tracing::error!(error = %e, chunk = number, total, "Failed to summarize chunk");
                    match self.chunk_failure_policy {
                        ChunkFailurePolicy::Abort => {
                            return Err(Error::SummarizationFailure(format!(
                                "chunk {number} of {total}: {e}"
                            )));
                        }
                        ChunkFailurePolicy::InlineMarker => {
                            summaries.push(format!("[Error summarizing chunk {number}: {e}]"));
                        }
                    }
                }
            }
        }

        Ok(summaries.iter().join("\n\n"))
    }
}
