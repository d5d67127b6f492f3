use std::sync::{Arc, Mutex};
use vid_digest::{Summarizer, SummaryResponse};

#[derive(Clone)]
pub struct MockSummarizer {
    /// Fixed summary; `None` answers `summary <n>` for the n-th call
    pub summary: Option<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
    /// 1-based call number that fails, every call fails when `None`
    pub fail_on_call: Option<usize>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: Some(summary.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            fail_on_call: None,
        }
    }

    pub fn numbered() -> Self {
        Self {
            summary: None,
            ..Self::new("")
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }

    pub fn failing_on(call: usize, msg: &str) -> Self {
        Self {
            summary: None,
            fail_with: Some(msg.to_string()),
            fail_on_call: Some(call),
            ..Self::new("")
        }
    }
}

impl Summarizer for MockSummarizer {
    type Error = anyhow::Error;

    async fn summarize(&self, content: &str) -> anyhow::Result<SummaryResponse> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(content.to_string());
            calls.len()
        };

        if let Some(ref msg) = self.fail_with {
            if self.fail_on_call.map_or(true, |n| n == call) {
                return Err(anyhow::anyhow!("{}", msg));
            }
        }

        let summary = match &self.summary {
            Some(summary) => summary.clone(),
            None => format!("summary {call}"),
        };
        Ok(SummaryResponse { summary })
    }
}
