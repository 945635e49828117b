use std::sync::Arc;

use crate::{
    config::Config,
    error::PipelineError,
    language::Language,
    summarize::{summarize, GeminiSummarizer, Summarizer, SUMMARY_PROMPT},
    transcript::{
        FetchError, Transcript, TranscriptService, TranscriptSource, YoutubeTranscriptSource,
    },
    translate::{FallbackTranslator, GoogleTranslator, SkippedSegment, Translator},
    video::VideoId,
};

/// Recoverable conditions met along the way. They never stop a request.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    /// The requested language had no track; a translated one is used instead.
    FallbackAttempted {
        requested: Language,
        target: Language,
    },
    SegmentTranslationSkipped(SkippedSegment),
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub video: Option<VideoId>,
    pub notices: Vec<Notice>,
    pub result: Result<String, PipelineError>,
}

/// Transcript acquisition, fallback translation and summarization for one video.
pub struct Pipeline {
    transcripts: TranscriptService,
    fallback: FallbackTranslator,
    summarizer: Arc<dyn Summarizer>,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn TranscriptSource>,
        translator: Arc<dyn Translator>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let transcripts = TranscriptService::new(source);
        Self {
            fallback: FallbackTranslator::new(transcripts.clone(), translator),
            transcripts,
            summarizer,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(YoutubeTranscriptSource),
            Arc::new(GoogleTranslator::new(config.translate_url.clone())),
            Arc::new(GeminiSummarizer::new(
                config.gemini_url.clone(),
                config.model.clone(),
                config.api_key.clone(),
            )),
        )
    }

    pub async fn run(&self, url: &str, language: Language) -> PipelineOutcome {
        let mut notices = Vec::new();

        let Some(video) = VideoId::from_url(url) else {
            return PipelineOutcome {
                video: None,
                notices,
                result: Err(PipelineError::InvalidVideoReference {
                    input: url.trim().to_string(),
                }),
            };
        };

        let result = self.summarize_video(&video, language, &mut notices).await;
        if let Err(e) = &result {
            log::error!("Summarizing {} failed: {}", video, e);
        }

        PipelineOutcome {
            video: Some(video),
            notices,
            result,
        }
    }

    async fn summarize_video(
        &self,
        video: &VideoId,
        language: Language,
        notices: &mut Vec<Notice>,
    ) -> Result<String, PipelineError> {
        let transcript = self.transcript(video, language, notices).await?;

        log::info!(
            "Summarizing {} ({} segments)",
            video,
            transcript.segments.len()
        );
        let summary =
            summarize(self.summarizer.as_ref(), &transcript.text(), SUMMARY_PROMPT).await?;
        Ok(summary)
    }

    async fn transcript(
        &self,
        video: &VideoId,
        language: Language,
        notices: &mut Vec<Notice>,
    ) -> Result<Transcript, PipelineError> {
        match self.transcripts.fetch(video, language).await {
            Ok(transcript) => Ok(transcript),
            Err(FetchError::NoTranscriptInLanguage { available }) => {
                log::warn!(
                    "No {} transcript for {} (available: {}), falling back to translation",
                    language.code(),
                    video,
                    available.join(", ")
                );
                notices.push(Notice::FallbackAttempted {
                    requested: language,
                    target: self.fallback.target(),
                });

                let translated = self
                    .fallback
                    .fetch_and_translate(video, language)
                    .await
                    .map_err(|e| PipelineError::from_fallback(video, e))?;

                notices.extend(
                    translated
                        .skipped
                        .into_iter()
                        .map(Notice::SegmentTranslationSkipped),
                );
                Ok(translated.transcript)
            }
            Err(e) => Err(PipelineError::from_fetch(video, e)),
        }
    }
}
