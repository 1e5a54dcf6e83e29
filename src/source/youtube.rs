//! YouTube Data API v3 comment source.

use std::time::Duration;

use chrono::Utc;
use log::{info, warn};
use serde::Deserialize;

use crate::error::{Result, SentiraError};
use crate::source::{CommentSource, RawComment};

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const PAGE_SIZE: u32 = 100;

/// Default cap on comments fetched per video.
pub const DEFAULT_MAX_RESULTS: usize = 500;

/// Metadata for a single video.
#[derive(Debug, Clone, serde::Serialize)]
pub struct VideoDetails {
    /// Video title.
    pub title: String,
    /// Channel the video belongs to.
    pub channel: String,
    /// View count.
    pub views: u64,
    /// Like count.
    pub likes: u64,
    /// Comment count.
    pub comments: u64,
}

/// Comment source backed by the YouTube Data API v3.
///
/// Fetches top-level comments in plain-text form, following pagination
/// tokens until `max_results` comments are collected or the pages run out.
#[derive(Debug)]
pub struct YouTubeCommentSource {
    client: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
    max_results: usize,
}

impl YouTubeCommentSource {
    /// Create a source using the given API key.
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SentiraError::source(format!("failed to build HTTP client: {e}")))?;
        Ok(YouTubeCommentSource {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    /// Cap the number of comments fetched per video.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Point the source at a different API base URL (for tests).
    pub fn with_api_base<S: Into<String>>(mut self, api_base: S) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Fetch title, channel, and counters for a video.
    pub fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>> {
        let url = format!("{}/videos", self.api_base);
        let response: VideoListResponse = self.get_json(
            &url,
            &[
                ("part", "snippet,statistics"),
                ("id", video_id),
                ("key", &self.api_key),
            ],
        )?;

        let Some(item) = response.items.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(VideoDetails {
            title: item.snippet.title,
            channel: item.snippet.channel_title,
            views: parse_count(item.statistics.view_count),
            likes: parse_count(item.statistics.like_count),
            comments: parse_count(item.statistics.comment_count),
        }))
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| SentiraError::source(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SentiraError::source(format!(
                "API returned {status} for {url}: {body}"
            )));
        }

        response
            .json()
            .map_err(|e| SentiraError::source(format!("bad response from {url}: {e}")))
    }
}

impl CommentSource for YouTubeCommentSource {
    fn fetch_comments(&self, video_id: &str) -> Result<Vec<RawComment>> {
        let url = format!("{}/commentThreads", self.api_base);
        let page_size = PAGE_SIZE.to_string();
        let mut comments = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", page_size.as_str()),
                ("textFormat", "plainText"),
                ("key", self.api_key.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let response: CommentThreadsResponse = self.get_json(&url, &query)?;

            for item in response.items {
                let text = item
                    .snippet
                    .and_then(|s| s.top_level_comment)
                    .and_then(|c| c.snippet)
                    .and_then(|s| s.text_display)
                    .unwrap_or_default();
                if text.is_empty() {
                    warn!("comment thread without text on video {video_id}");
                }
                comments.push(RawComment {
                    video_id: video_id.to_string(),
                    text,
                    timestamp: Utc::now(),
                });
            }

            if comments.len() >= self.max_results {
                comments.truncate(self.max_results);
                break;
            }
            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!("fetched {} comments for video {video_id}", comments.len());
        Ok(comments)
    }
}

fn parse_count(value: Option<String>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

#[derive(Debug, Deserialize)]
struct CommentThreadsResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: Option<CommentThreadSnippet>,
}

#[derive(Debug, Deserialize)]
struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    top_level_comment: Option<TopLevelComment>,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: Option<CommentSnippet>,
}

#[derive(Debug, Deserialize)]
struct CommentSnippet {
    #[serde(rename = "textDisplay")]
    text_display: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
}

#[derive(Debug, Default, Deserialize)]
struct VideoStatistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
    #[serde(rename = "likeCount")]
    like_count: Option<String>,
    #[serde(rename = "commentCount")]
    comment_count: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_threads_response_parsing() {
        let json = r#"{
            "items": [
                {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "Nice video"}}}},
                {"snippet": {"topLevelComment": {"snippet": {}}}}
            ],
            "nextPageToken": "abc"
        }"#;

        let response: CommentThreadsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.next_page_token.as_deref(), Some("abc"));
        assert_eq!(
            response.items[0]
                .snippet
                .as_ref()
                .and_then(|s| s.top_level_comment.as_ref())
                .and_then(|c| c.snippet.as_ref())
                .and_then(|s| s.text_display.as_deref()),
            Some("Nice video")
        );
    }

    #[test]
    fn test_video_list_response_parsing() {
        let json = r#"{
            "items": [{
                "snippet": {"title": "A video", "channelTitle": "A channel"},
                "statistics": {"viewCount": "1000", "likeCount": "50"}
            }]
        }"#;

        let response: VideoListResponse = serde_json::from_str(json).unwrap();
        let item = &response.items[0];
        assert_eq!(item.snippet.title, "A video");
        assert_eq!(parse_count(item.statistics.view_count.clone()), 1000);
        assert_eq!(parse_count(item.statistics.comment_count.clone()), 0);
    }

    #[test]
    fn test_parse_count_defaults_to_zero() {
        assert_eq!(parse_count(None), 0);
        assert_eq!(parse_count(Some("not a number".to_string())), 0);
        assert_eq!(parse_count(Some("42".to_string())), 42);
    }
}
