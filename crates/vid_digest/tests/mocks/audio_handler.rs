use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};
use vid_digest::yt::{AudioArtifact, AudioHandler};

#[derive(Clone)]
pub struct MockAudioHandler {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub paths: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
    pub write_file: bool,
}

impl Default for MockAudioHandler {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            paths: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            write_file: true,
        }
    }
}

impl MockAudioHandler {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }

    /// Reports success without producing a file
    pub fn without_output() -> Self {
        Self {
            write_file: false,
            ..Default::default()
        }
    }
}

impl AudioHandler for MockAudioHandler {
    type Error = anyhow::Error;

    async fn download(&self, url: &str, artifact: &AudioArtifact) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(url.to_string());
        self.paths.lock().unwrap().push(artifact.path().to_path_buf());
        if let Some(ref msg) = self.fail_with {
            // partial download left behind by the tool
            std::fs::write(artifact.path().with_extension("webm.part"), b"partial")?;
            return Err(anyhow::anyhow!("{}", msg));
        }
        if self.write_file {
            std::fs::write(artifact.path(), b"ID3 mock audio")?;
        }
        Ok(())
    }
}
