use std::path::PathBuf;

use crate::{
    config::ChunkFailurePolicy, yt::AudioHandler, Summarizer, SummaryPipeline, Transcriber,
};

pub struct SummaryPipelineBuilder<A = (), T = (), S = ()> {
    workdir: PathBuf,
    audio_handler: A,
    transcriber: T,
    summarizer: S,
    chunk_max_chars: Option<usize>,
    chunk_failure_policy: ChunkFailurePolicy,
}

impl SummaryPipelineBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            audio_handler: (),
            transcriber: (),
            summarizer: (),
            chunk_max_chars: None,
            chunk_failure_policy: ChunkFailurePolicy::default(),
        }
    }
}

impl<A, T, S> SummaryPipelineBuilder<A, T, S> {
    pub fn audio_handler<A2: AudioHandler + Send + Sync + 'static>(
        self,
        audio_handler: A2,
    ) -> SummaryPipelineBuilder<A2, T, S> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            audio_handler,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            chunk_max_chars: self.chunk_max_chars,
            chunk_failure_policy: self.chunk_failure_policy,
        }
    }

    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> SummaryPipelineBuilder<A, T2, S> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            audio_handler: self.audio_handler,
            transcriber,
            summarizer: self.summarizer,
            chunk_max_chars: self.chunk_max_chars,
            chunk_failure_policy: self.chunk_failure_policy,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> SummaryPipelineBuilder<A, T, S2> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            audio_handler: self.audio_handler,
            transcriber: self.transcriber,
            summarizer,
            chunk_max_chars: self.chunk_max_chars,
            chunk_failure_policy: self.chunk_failure_policy,
        }
    }

    pub fn with_chunking(mut self, max_chars: usize) -> Self {
        self.chunk_max_chars = Some(max_chars);
        self
    }

    pub fn chunk_failure_policy(mut self, policy: ChunkFailurePolicy) -> Self {
        self.chunk_failure_policy = policy;
        self
    }
}

impl<A, T, S> SummaryPipelineBuilder<A, T, S>
where
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn build(self) -> SummaryPipeline<A, T, S> {
        SummaryPipeline {
            workdir: self.workdir,
            audio_handler: self.audio_handler,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            chunk_max_chars: self.chunk_max_chars,
            chunk_failure_policy: self.chunk_failure_policy,
        }
    }
}
