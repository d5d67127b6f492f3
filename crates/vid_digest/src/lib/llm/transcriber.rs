use std::{fmt::Display, future::Future, path::Path};

pub trait Transcriber {
    type Error: Display + Send;

    /// Uploads the audio file and returns its transcript.
    /// An empty transcript is reported as an error, never as `Ok`.
    fn transcribe(
        &self,
        audio_path: &Path,
    ) -> impl Future<Output = Result<TranscribeResponse, Self::Error>> + Send;
}

#[derive(Debug, Clone)]
pub struct TranscribeResponse {
    pub text: String,
}
