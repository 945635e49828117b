//! In-memory stand-ins for the three external services.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{
    summarize::{SummarizeError, Summarizer},
    transcript::{FetchError, Transcript, TranscriptSegment, TranscriptSource},
    translate::{TranslateError, Translator},
    video::VideoId,
};

pub fn track(segments: &[(&str, f64)]) -> Vec<TranscriptSegment> {
    segments
        .iter()
        .map(|&(text, start)| TranscriptSegment {
            text: text.to_string(),
            start,
            duration: 1.0,
        })
        .collect()
}

struct Track {
    video: String,
    language: Option<String>,
    segments: Vec<TranscriptSegment>,
}

/// Serves tracks in insertion order. The first track of a video is its default.
#[derive(Default)]
pub struct FakeSource {
    tracks: Vec<Track>,
    failures: HashMap<String, FetchError>,
    requests: Mutex<Vec<Option<String>>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, video: &str, language: &str, segments: Vec<TranscriptSegment>) -> Self {
        self.tracks.push(Track {
            video: video.to_string(),
            language: Some(language.to_string()),
            segments,
        });
        self
    }

    /// A track the source cannot name the language of.
    pub fn with_unlabelled_default(mut self, video: &str, segments: Vec<TranscriptSegment>) -> Self {
        self.tracks.push(Track {
            video: video.to_string(),
            language: None,
            segments,
        });
        self
    }

    pub fn with_failure(mut self, video: &str, err: FetchError) -> Self {
        self.failures.insert(video.to_string(), err);
        self
    }

    pub fn requests(&self) -> Vec<Option<String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptSource for FakeSource {
    async fn fetch_track(
        &self,
        video: &VideoId,
        language: Option<&str>,
    ) -> Result<Transcript, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push(language.map(str::to_string));

        if let Some(err) = self.failures.get(video.as_str()) {
            return Err(err.clone());
        }

        let tracks: Vec<&Track> = self
            .tracks
            .iter()
            .filter(|t| t.video == video.as_str())
            .collect();

        let found = match language {
            Some(lang) => tracks
                .iter()
                .find(|t| t.language.as_deref() == Some(lang)),
            None => tracks.first(),
        };

        match found {
            Some(t) => Ok(Transcript {
                language: t.language.clone(),
                segments: t.segments.clone(),
            }),
            None if tracks.is_empty() => Err(FetchError::NoTranscriptAvailable),
            None => Err(FetchError::NoTranscriptInLanguage {
                available: tracks.iter().filter_map(|t| t.language.clone()).collect(),
            }),
        }
    }
}

/// Answers from a fixed table. Unknown text gets a malformed response.
#[derive(Default)]
pub struct FakeTranslator {
    answers: HashMap<String, Result<String, TranslateError>>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, answer: Result<&str, TranslateError>) -> Self {
        self.answers
            .insert(text.to_string(), answer.map(str::to_string));
        self
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        self.calls.lock().unwrap().push((
            text.to_string(),
            source.to_string(),
            target.to_string(),
        ));

        self.answers
            .get(text)
            .cloned()
            .unwrap_or_else(|| Err(TranslateError::Malformed(format!("no answer for {:?}", text))))
    }
}

/// Deterministic model: the summary is derived from the prompt alone.
#[derive(Default)]
pub struct FakeSummarizer {
    failure: Option<SummarizeError>,
    prompts: Mutex<Vec<String>>,
}

impl FakeSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: SummarizeError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    pub fn expected(prompt: &str) -> String {
        let transcript = prompt.rsplit(": ").next().unwrap_or(prompt);
        format!("* {} ({} chars)", transcript, prompt.len())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(Self::expected(prompt)),
        }
    }
}
