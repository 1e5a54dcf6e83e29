//! Persistence for classified comments.
//!
//! Two backends with different roles: [`dataset::DatasetStore`] keeps the
//! flat-file CSV datasets the dashboard reads (per-video snapshots plus an
//! aggregated master dataset with replace-by-video merge semantics), and
//! [`sqlite::SqliteCommentStore`] is the relational append-and-query store.
//!
//! The ingestion pipeline treats both as collaborators: an insert either
//! succeeds or returns an error the caller may log and ignore, because by
//! the time storage runs, classification has already succeeded.

pub mod dataset;
pub mod sqlite;

pub use dataset::{DatasetStore, HistoryEntry};
pub use sqlite::SqliteCommentStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sentiment::SentimentLabel;

/// A platform comment annotated with its predicted sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Video the comment belongs to.
    pub video_id: String,
    /// Raw comment text.
    pub comment: String,
    /// Predicted sentiment label.
    pub sentiment: SentimentLabel,
    /// When the comment was collected.
    pub timestamp: DateTime<Utc>,
}

/// Append-and-query store for comment records.
pub trait CommentStore: Send + Sync {
    /// Append records to the store.
    fn insert_comments(&self, records: &[CommentRecord]) -> Result<()>;

    /// Fetch every stored record.
    fn fetch_all(&self) -> Result<Vec<CommentRecord>>;
}
