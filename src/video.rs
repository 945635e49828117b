use std::fmt;

use reqwest::Url;

/// Identifier of a single YouTube video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    /// Extracts the video id from a watch, short-link, shorts, embed or live URL.
    ///
    /// Returns `None` when the input is not a YouTube URL or carries no usable id.
    pub fn from_url(input: &str) -> Option<VideoId> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let url = if input.contains("://") {
            Url::parse(input).ok()?
        } else {
            Url::parse(&format!("https://{}", input)).ok()?
        };

        let host = url.host_str()?.to_ascii_lowercase();
        let candidate = if host == "youtu.be" {
            url.path_segments()?.next().map(str::to_string)
        } else if host == "youtube.com" || host.ends_with(".youtube.com") {
            let mut segments = url.path_segments()?;
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                Some("shorts") | Some("embed") | Some("live") => {
                    segments.next().map(str::to_string)
                }
                _ => None,
            }
        } else {
            None
        };

        candidate.filter(|id| is_valid_id(id)).map(VideoId)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/0.jpg", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
impl From<&str> for VideoId {
    fn from(id: &str) -> Self {
        VideoId(id.to_string())
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(input: &str) -> Option<String> {
        VideoId::from_url(input).map(|v| v.as_str().to_string())
    }

    #[test]
    fn test_watch_urls() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=HQoJMIgNdjo"),
            Some("HQoJMIgNdjo".into())
        );
        assert_eq!(
            id("https://m.youtube.com/watch?feature=share&v=abc123&t=42"),
            Some("abc123".into())
        );
        assert_eq!(id("youtube.com/watch?v=xyz789"), Some("xyz789".into()));
    }

    #[test]
    fn test_short_and_path_urls() {
        assert_eq!(id("https://youtu.be/abc123?si=foo"), Some("abc123".into()));
        assert_eq!(
            id("https://www.youtube.com/shorts/a_b-C"),
            Some("a_b-C".into())
        );
        assert_eq!(
            id("https://www.youtube.com/embed/abc123"),
            Some("abc123".into())
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(id("not-a-url"), None);
        assert_eq!(id(""), None);
        assert_eq!(id("https://example.com/watch?v=abc123"), None);
        assert_eq!(id("https://www.youtube.com/watch"), None);
        assert_eq!(id("https://www.youtube.com/watch?v="), None);
        assert_eq!(id("https://www.youtube.com/watch?v=a%20b"), None);
        assert_eq!(id("https://www.notyoutube.com/watch?v=abc123"), None);
    }

    #[test]
    fn test_thumbnail_url() {
        let video = VideoId::from("abc123");
        assert_eq!(
            video.thumbnail_url(),
            "https://img.youtube.com/vi/abc123/0.jpg"
        );
    }
}
