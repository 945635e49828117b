use std::sync::Arc;

use async_trait::async_trait;
use html_escape::decode_html_entities;
use thiserror::Error;
use ytranscript::{
    TranscriptConfig, TranscriptResponse, YoutubeTranscript, YoutubeTranscriptError,
};

use crate::{language::Language, video::VideoId};

#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// One caption track, in playback order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Transcript {
    /// Track language as reported by the source, if it reported one.
    pub language: Option<String>,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    #[error("no transcript in the requested language (available: {})", .available.join(", "))]
    NoTranscriptInLanguage { available: Vec<String> },

    #[error("no transcript available in any language")]
    NoTranscriptAvailable,

    #[error("{reason}")]
    FetchFailed { reason: String },
}

/// Where caption tracks come from.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetches the track in `language`, or the video's default track when `None`.
    async fn fetch_track(
        &self,
        video: &VideoId,
        language: Option<&str>,
    ) -> Result<Transcript, FetchError>;
}

pub struct YoutubeTranscriptSource;

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    async fn fetch_track(
        &self,
        video: &VideoId,
        language: Option<&str>,
    ) -> Result<Transcript, FetchError> {
        YoutubeTranscript::fetch_transcript(video.as_str(), transcript_config(language))
            .await
            .map(|entries| into_transcript(entries, language))
            .map_err(from_ytranscript)
    }
}

// ytranscript unwraps `lang` whenever a config is given, so the default track
// must be requested without one.
fn transcript_config(language: Option<&str>) -> Option<TranscriptConfig> {
    language.map(|lang| TranscriptConfig {
        lang: Some(lang.to_string()),
    })
}

fn into_transcript(entries: Vec<TranscriptResponse>, requested: Option<&str>) -> Transcript {
    let language = entries
        .first()
        .map(|entry| entry.lang.clone())
        .filter(|lang| !lang.is_empty())
        .or_else(|| requested.map(str::to_string));

    Transcript {
        language,
        segments: entries
            .into_iter()
            .map(|entry| TranscriptSegment {
                text: decode_html_entities(&entry.text)
                    .replace("&#39;", "'")
                    .to_string(),
                start: entry.offset,
                duration: entry.duration,
            })
            .collect(),
    }
}

fn from_ytranscript(err: YoutubeTranscriptError) -> FetchError {
    match err {
        YoutubeTranscriptError::TranscriptNotAvailableLanguage(_, available, _) => {
            if available.is_empty() {
                FetchError::NoTranscriptAvailable
            } else {
                FetchError::NoTranscriptInLanguage { available }
            }
        }
        YoutubeTranscriptError::TranscriptDisabled(_)
        | YoutubeTranscriptError::TranscriptNotAvailable(_) => FetchError::NoTranscriptAvailable,
        other @ (YoutubeTranscriptError::TooManyRequests
        | YoutubeTranscriptError::VideoUnavailable(_)
        | YoutubeTranscriptError::InvalidVideoId) => FetchError::FetchFailed {
            reason: other.to_string(),
        },
    }
}

#[derive(Clone)]
pub struct TranscriptService {
    source: Arc<dyn TranscriptSource>,
}

impl TranscriptService {
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self { source }
    }

    /// Fetches the track in exactly `language`.
    pub async fn fetch(
        &self,
        video: &VideoId,
        language: Language,
    ) -> Result<Transcript, FetchError> {
        log::info!("Fetching {} transcript for {}", language.code(), video);
        let transcript = self.source.fetch_track(video, Some(language.code())).await?;
        non_empty(transcript)
    }

    /// Fetches whichever track the video offers first.
    pub async fn fetch_default(&self, video: &VideoId) -> Result<Transcript, FetchError> {
        log::info!("Fetching default transcript for {}", video);
        let transcript = self.source.fetch_track(video, None).await?;
        non_empty(transcript)
    }
}

fn non_empty(transcript: Transcript) -> Result<Transcript, FetchError> {
    if transcript.is_empty() {
        Err(FetchError::NoTranscriptAvailable)
    } else {
        Ok(transcript)
    }
}
