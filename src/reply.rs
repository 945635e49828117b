//! User-facing text for everything the pipeline can report.

use crate::{
    error::PipelineError,
    language::Language,
    pipeline::Notice,
    video::VideoId,
};

pub const USAGE: &str = "🎬 VidSums turns hours of YouTube into minutes of insights.\n\n\
Send me a YouTube link, optionally followed by a transcript language code:\n\
https://www.youtube.com/watch?v=example fr\n\n\
The language defaults to English. Use /languages to see every supported code.";

pub const INVALID_LINK: &str = "😅 Please enter a valid YouTube link.";

pub const EMPTY_REQUEST: &str = "Please provide a YouTube link.";

pub fn unknown_language(code: &str) -> String {
    format!(
        "Unknown language code '{}'. Use /languages to see the supported codes.",
        code
    )
}

pub fn languages() -> String {
    let mut text = String::from("🌍 Supported transcript languages:\n");
    for language in Language::all() {
        text.push_str(&format!("\n{} - {}", language.code(), language.name()));
    }
    text
}

pub fn header(video: &VideoId) -> String {
    format!("🎬 {}", video.thumbnail_url())
}

pub fn summary(text: &str) -> String {
    format!("📝 Your Quickfire Video Summary\n\n{}", text)
}

/// One message per notice kind; skipped segments are reported as a count.
pub fn notices(notices: &[Notice]) -> Vec<String> {
    let mut messages = Vec::new();
    let mut skipped = 0;

    for notice in notices {
        match notice {
            Notice::FallbackAttempted { requested, target } => messages.push(format!(
                "⚠️ Transcript not available in {}. Attempting to retrieve a transcript and translate it to {}.",
                requested, target
            )),
            Notice::SegmentTranslationSkipped(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        messages.push(format!(
            "⚠️ {} transcript segment{} could not be translated and {} skipped.",
            skipped,
            if skipped == 1 { "" } else { "s" },
            if skipped == 1 { "was" } else { "were" }
        ));
    }

    messages
}

pub fn error(err: &PipelineError) -> String {
    match err {
        PipelineError::InvalidVideoReference { .. } => INVALID_LINK.to_string(),
        PipelineError::NoTranscriptAvailable { .. } => {
            "❌ This video has no transcript in any language. Try another video!".to_string()
        }
        PipelineError::FetchFailed { reason } => {
            format!("❌ Oops, we couldn't retrieve the transcript: {}", reason)
        }
        PipelineError::TranslationFailed { reason } => {
            format!("❌ The transcript could not be translated: {}", reason)
        }
        PipelineError::SummarizationFailed(e) => {
            format!("❌ The summary could not be generated: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{summarize::SummarizeError, translate::SkippedSegment};

    fn skipped(text: &str) -> Notice {
        Notice::SegmentTranslationSkipped(SkippedSegment {
            text: text.to_string(),
            reason: "malformed".to_string(),
        })
    }

    #[test]
    fn test_fallback_notice_names_languages() {
        let messages = notices(&[Notice::FallbackAttempted {
            requested: Language::parse("de").expect("de"),
            target: Language::ENGLISH,
        }]);
        assert_eq!(
            messages,
            vec!["⚠️ Transcript not available in german. Attempting to retrieve a transcript and translate it to english."]
        );
    }

    #[test]
    fn test_skipped_segments_are_counted() {
        assert_eq!(
            notices(&[skipped("a")]),
            vec!["⚠️ 1 transcript segment could not be translated and was skipped."]
        );
        assert_eq!(
            notices(&[skipped("a"), skipped("b"), skipped("c")]),
            vec!["⚠️ 3 transcript segments could not be translated and were skipped."]
        );
        assert!(notices(&[]).is_empty());
    }

    #[test]
    fn test_every_error_has_its_own_message() {
        let errors = [
            PipelineError::InvalidVideoReference {
                input: "x".into(),
            },
            PipelineError::NoTranscriptAvailable { video: "x".into() },
            PipelineError::FetchFailed {
                reason: "x".into(),
            },
            PipelineError::TranslationFailed {
                reason: "x".into(),
            },
            PipelineError::SummarizationFailed(SummarizeError::Request("x".into())),
        ];

        let mut messages: Vec<String> = errors.iter().map(error).collect();
        assert!(messages.iter().all(|m| !m.trim().is_empty()));
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_languages_lists_codes() {
        let text = languages();
        assert!(text.contains("\nen - english"));
        assert!(text.contains("\nzh-cn - chinese (simplified)"));
    }

    #[test]
    fn test_header_links_thumbnail() {
        assert_eq!(
            header(&VideoId::from("abc123")),
            "🎬 https://img.youtube.com/vi/abc123/0.jpg"
        );
    }
}
