pub mod artifact;
pub mod audio_handler;

use std::future::Future;

pub use artifact::AudioArtifact;
pub use audio_handler::{AudioError, YtDlp};

pub trait AudioHandler {
    type Error: std::fmt::Display + Send;

    /// Extracts the audio track of `url` into the artifact's path as mp3
    fn download(
        &self,
        url: &str,
        artifact: &AudioArtifact,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
