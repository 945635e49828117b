use thiserror::Error;

use crate::{
    summarize::SummarizeError,
    transcript::FetchError,
    translate::FallbackError,
    video::VideoId,
};

/// Terminal outcomes of a summarization request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Not a valid YouTube link: {input}")]
    InvalidVideoReference { input: String },

    #[error("No transcript available for video {video}")]
    NoTranscriptAvailable { video: String },

    #[error("Transcript fetch failed: {reason}")]
    FetchFailed { reason: String },

    #[error("Translation failed: {reason}")]
    TranslationFailed { reason: String },

    #[error("Summarization failed: {0}")]
    SummarizationFailed(#[from] SummarizeError),
}

impl PipelineError {
    pub(crate) fn from_fetch(video: &VideoId, err: FetchError) -> Self {
        match err {
            FetchError::NoTranscriptAvailable => PipelineError::NoTranscriptAvailable {
                video: video.to_string(),
            },
            other => PipelineError::FetchFailed {
                reason: other.to_string(),
            },
        }
    }

    pub(crate) fn from_fallback(video: &VideoId, err: FallbackError) -> Self {
        match err {
            FallbackError::NoTranscriptAvailable => PipelineError::NoTranscriptAvailable {
                video: video.to_string(),
            },
            FallbackError::FetchFailed { reason } => PipelineError::FetchFailed { reason },
            FallbackError::TranslationFailed { reason } => {
                PipelineError::TranslationFailed { reason }
            }
        }
    }
}
