pub mod chunker;
pub mod config;
pub mod error;
mod llm;
mod processor;
pub mod server;
pub mod tracing;
pub mod yt;

pub use config::{ChunkFailurePolicy, Cli, Config};
pub use error::{Error, Stage};
pub use llm::openai;
pub use llm::{
    summarizer::{SummaryResponse, Summarizer},
    transcriber::{TranscribeResponse, Transcriber},
};
pub use processor::{builder::SummaryPipelineBuilder, SummaryPipeline};
