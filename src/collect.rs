//! Comment ingestion pipeline: fetch, classify, persist.

use std::path::PathBuf;

use chrono::Utc;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sentiment::{SentimentLabel, SentimentService};
use crate::source::{CommentSource, RawComment};
use crate::store::dataset::{DatasetStore, HistoryEntry};
use crate::store::{CommentRecord, CommentStore};

/// Outcome of one collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Video that was collected.
    pub video_id: String,
    /// Comments classified.
    pub total: usize,
    /// Comments classified positive.
    pub positive: usize,
    /// Comments classified negative.
    pub negative: usize,
    /// Comments skipped because scoring them failed.
    pub skipped: usize,
    /// Per-video snapshot dataset, when any comment was collected.
    pub dataset_path: Option<PathBuf>,
    /// Whether the relational store accepted the records.
    pub db_persisted: bool,
}

/// Pipeline that pulls comments from a source, scores them, and persists
/// the annotated records.
///
/// All collaborators are borrowed: the collector owns no state of its own,
/// and the service it scores with was loaded once by the caller.
pub struct CommentCollector<'a> {
    source: &'a dyn CommentSource,
    service: &'a SentimentService,
    datasets: &'a DatasetStore,
    database: Option<&'a dyn CommentStore>,
}

impl<'a> CommentCollector<'a> {
    /// Create a collector over the given collaborators.
    pub fn new(
        source: &'a dyn CommentSource,
        service: &'a SentimentService,
        datasets: &'a DatasetStore,
        database: Option<&'a dyn CommentStore>,
    ) -> Self {
        CommentCollector {
            source,
            service,
            datasets,
            database,
        }
    }

    /// Collect and classify the comments of one video.
    ///
    /// A source failure is fatal to the run. A failure to score one comment
    /// is isolated: the item is counted as skipped and the batch continues.
    /// A relational-store failure is logged and reflected in the summary,
    /// but the run still succeeds — classification and the flat-file
    /// datasets are already done by then.
    pub fn collect(&self, video_id: &str) -> Result<CollectionSummary> {
        info!("fetching comments for video {video_id}");
        let comments = self.source.fetch_comments(video_id)?;

        if comments.is_empty() {
            info!("no comments found for video {video_id}");
            return Ok(CollectionSummary {
                video_id: video_id.to_string(),
                total: 0,
                positive: 0,
                negative: 0,
                skipped: 0,
                dataset_path: None,
                db_persisted: false,
            });
        }

        info!("classifying {} comments", comments.len());
        let mut records = Vec::with_capacity(comments.len());
        let mut skipped = 0usize;
        for comment in &comments {
            match self.classify(comment) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("skipping comment on video {video_id}: {e}");
                    skipped += 1;
                }
            }
        }

        let positive = records
            .iter()
            .filter(|r| r.sentiment == SentimentLabel::Positive)
            .count();
        let negative = records.len() - positive;

        let dataset_path = self.datasets.write_video_dataset(video_id, &records)?;
        self.datasets.merge_into_master(video_id, &records)?;
        self.datasets.append_history(&HistoryEntry {
            date: Utc::now(),
            video_id: video_id.to_string(),
            total: records.len(),
            positive,
            negative,
        })?;

        let db_persisted = match self.database {
            Some(store) => match store.insert_comments(&records) {
                Ok(()) => true,
                Err(e) => {
                    warn!("database insert failed for video {video_id}: {e}");
                    false
                }
            },
            None => false,
        };

        info!(
            "video {video_id}: {} comments, {positive} positive, {negative} negative",
            records.len()
        );

        Ok(CollectionSummary {
            video_id: video_id.to_string(),
            total: records.len(),
            positive,
            negative,
            skipped,
            dataset_path: Some(dataset_path),
            db_persisted,
        })
    }

    fn classify(&self, comment: &RawComment) -> Result<CommentRecord> {
        let sentiment = self.service.predict(&comment.text);
        Ok(CommentRecord {
            video_id: comment.video_id.clone(),
            comment: comment.text.clone(),
            sentiment,
            timestamp: comment.timestamp,
        })
    }
}
