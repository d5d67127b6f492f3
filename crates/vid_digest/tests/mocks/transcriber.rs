use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use vid_digest::{TranscribeResponse, Transcriber};

#[derive(Clone)]
pub struct MockTranscriber {
    pub response_text: String,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub saw_file: Arc<Mutex<Vec<bool>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriber {
    pub fn new(response_text: &str) -> Self {
        Self {
            response_text: response_text.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            saw_file: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }
}

impl Transcriber for MockTranscriber {
    type Error = anyhow::Error;

    async fn transcribe(&self, audio_path: &Path) -> anyhow::Result<TranscribeResponse> {
        self.calls.lock().unwrap().push(audio_path.to_path_buf());
        self.saw_file.lock().unwrap().push(audio_path.exists());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(TranscribeResponse {
            text: self.response_text.clone(),
        })
    }
}
