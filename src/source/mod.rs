//! Comment sources.
//!
//! A comment source yields the raw comments for a video identifier. How it
//! obtains them — pagination, rate limits, auth — is its own concern; the
//! ingestion pipeline only sees the resulting records.

pub mod youtube;

pub use youtube::{VideoDetails, YouTubeCommentSource};

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;

/// A comment as obtained from the platform, before classification.
#[derive(Debug, Clone)]
pub struct RawComment {
    /// Video the comment belongs to.
    pub video_id: String,
    /// Comment text; absent text upstream is coerced to the empty string.
    pub text: String,
    /// Collection timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Trait for systems that yield comments for a video.
pub trait CommentSource {
    /// Fetch the comments for `video_id`.
    fn fetch_comments(&self, video_id: &str) -> Result<Vec<RawComment>>;
}

/// An in-memory source with fixed comments, for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticCommentSource {
    comments: Vec<RawComment>,
}

impl StaticCommentSource {
    /// Create a source that yields the given comments.
    pub fn new(comments: Vec<RawComment>) -> Self {
        StaticCommentSource { comments }
    }
}

impl CommentSource for StaticCommentSource {
    fn fetch_comments(&self, video_id: &str) -> Result<Vec<RawComment>> {
        Ok(self
            .comments
            .iter()
            .filter(|comment| comment.video_id == video_id)
            .cloned()
            .collect())
    }
}

lazy_static! {
    static ref URL_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"[?&]v=([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"youtu\.be/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"/embed/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"/shorts/([A-Za-z0-9_-]{11})").unwrap(),
    ];
    static ref BARE_ID: Regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap();
}

/// Extract a video id from a watch URL, short URL, embed URL, or bare id.
///
/// Returns `None` when the input matches none of the known shapes.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if BARE_ID.is_match(input) {
        return Some(input.to_string());
    }
    for pattern in URL_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(input) {
            return Some(captures[1].to_string());
        }
    }
    None
}
