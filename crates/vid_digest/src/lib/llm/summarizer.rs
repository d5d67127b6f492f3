use std::{fmt::Display, future::Future};

pub trait Summarizer {
    type Error: Display + Send;

    /// One completion request for one piece of transcript text
    fn summarize(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;
}

#[derive(Debug, Clone)]
pub struct SummaryResponse {
    pub summary: String,
}
