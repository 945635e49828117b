use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::{
    language::Language,
    transcript::{FetchError, Transcript, TranscriptSegment, TranscriptService},
    video::VideoId,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslateError {
    /// The service answered, but not with a usable translation.
    #[error("malformed translation response: {0}")]
    Malformed(String),

    /// The call itself failed.
    #[error("translation service error: {0}")]
    Service(String),
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str)
        -> Result<String, TranslateError>;
}

/// Client for the public Google Translate web endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| TranslateError::Service(e.to_string()))?;

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| TranslateError::Malformed(e.to_string()))?;

        parse_translation(&body)
            .ok_or_else(|| TranslateError::Malformed(format!("unexpected shape: {}", body)))
    }
}

/// The endpoint answers `[[["translated", "original", ...], ...], ...]`, one
/// inner array per sentence.
fn parse_translation(body: &Value) -> Option<String> {
    let sentences = body.get(0)?.as_array()?;
    let text: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0)?.as_str())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FallbackError {
    #[error("no transcript available in any language")]
    NoTranscriptAvailable,

    #[error("{reason}")]
    FetchFailed { reason: String },

    #[error("{reason}")]
    TranslationFailed { reason: String },
}

impl From<FetchError> for FallbackError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NoTranscriptAvailable => FallbackError::NoTranscriptAvailable,
            other => FallbackError::FetchFailed {
                reason: other.to_string(),
            },
        }
    }
}

/// A segment left out of a translated transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedSegment {
    pub text: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct Translated {
    pub transcript: Transcript,
    pub skipped: Vec<SkippedSegment>,
}

/// Fetches the default track and translates it segment by segment.
///
/// A malformed answer drops that segment and processing continues. A failed
/// service call aborts the whole translation, as does losing every segment.
pub struct FallbackTranslator {
    transcripts: TranscriptService,
    translator: Arc<dyn Translator>,
    target: Language,
}

impl FallbackTranslator {
    pub fn new(transcripts: TranscriptService, translator: Arc<dyn Translator>) -> Self {
        Self {
            transcripts,
            translator,
            target: Language::ENGLISH,
        }
    }

    pub fn target(&self) -> Language {
        self.target
    }

    pub async fn fetch_and_translate(
        &self,
        video: &VideoId,
        desired: Language,
    ) -> Result<Translated, FallbackError> {
        let original = self.transcripts.fetch_default(video).await?;
        let source = original
            .language
            .clone()
            .unwrap_or_else(|| desired.code().to_string());

        log::info!(
            "Translating {} segments of {} from {} to {}",
            original.segments.len(),
            video,
            source,
            self.target.code()
        );

        let mut segments = Vec::with_capacity(original.segments.len());
        let mut skipped = Vec::new();

        for segment in original.segments {
            match self
                .translator
                .translate(&segment.text, &source, self.target.code())
                .await
            {
                Ok(text) => segments.push(TranscriptSegment { text, ..segment }),
                Err(TranslateError::Malformed(reason)) => {
                    log::warn!("Skipping segment {:?}: {}", segment.text, reason);
                    skipped.push(SkippedSegment {
                        text: segment.text,
                        reason,
                    });
                }
                Err(err @ TranslateError::Service(_)) => {
                    return Err(FallbackError::TranslationFailed {
                        reason: err.to_string(),
                    });
                }
            }
        }

        if segments.is_empty() {
            return Err(FallbackError::TranslationFailed {
                reason: format!("none of the {} segments could be translated", skipped.len()),
            });
        }

        Ok(Translated {
            transcript: Transcript {
                language: Some(self.target.code().to_string()),
                segments,
            },
            skipped,
        })
    }
}
