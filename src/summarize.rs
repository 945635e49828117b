use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SUMMARY_PROMPT: &str = r#"You are an advanced YouTube video summarizer. Your task is to summarize the entire transcript provided, ensuring that the summary is clear, concise, and highly informative.

Please adhere to the following guidelines while summarizing the text:

1. **Bullet Points**: Present the summary in bullet points for easy reading and quick reference.
2. **Key Themes & Topics**: Identify and elaborate on the main themes, topics, or subjects discussed in the video. Highlight any major shifts in topic or important discussions.
3. **Actionable Insights & Takeaways**: Highlight any actionable advice, recommendations, or insights that the video offers to its viewers.
4. **Time Stamps**: Include time stamps (e.g., 01:25) when discussing key points or themes, so viewers can navigate directly to relevant sections.
5. **Sentiment Analysis**: Provide a brief sentiment analysis, highlighting the tone of the video (e.g., motivating, informative, reflective).
6. **Key Keywords**: List important keywords or phrases that are central to understanding the video's content.
7. **Length**: The summary should be clear, concise, and not exceed 300 words. Prioritize clarity, relevance, and coherence.

Here is the transcript text for summarization: "#;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SummarizeError {
    #[error("API request failed: {0}")]
    Request(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// A hosted text-generation model.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError>;
}

/// Prepends `template` to the transcript and returns the model's text verbatim.
pub async fn summarize(
    model: &dyn Summarizer,
    transcript: &str,
    template: &str,
) -> Result<String, SummarizeError> {
    let prompt = format!("{}{}", template, transcript);
    model.generate(&prompt).await
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini `generateContent` client.
pub struct GeminiSummarizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiSummarizer {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Request(format!("{}: {}", status, body)));
        }

        let response = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| SummarizeError::InvalidResponse(e.to_string()))?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(SummarizeError::InvalidResponse(
                "response contained no text".to_string(),
            ));
        }

        Ok(text)
    }
}
