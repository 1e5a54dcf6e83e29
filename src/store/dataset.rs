//! Flat-file CSV datasets.
//!
//! The dataset directory holds one snapshot CSV per collected video
//! (`comments_<video_id>.csv`), the aggregated `master_dataset.csv`, and an
//! `history.csv` log of collection runs. Re-collecting a video replaces its
//! rows in the master dataset; rows for other videos are untouched. That
//! replace-by-key merge is the only cross-run deduplication the system
//! performs.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentiraError};
use crate::store::CommentRecord;

/// File name of the aggregated dataset.
pub const MASTER_FILE: &str = "master_dataset.csv";
/// File name of the collection-history log.
pub const HISTORY_FILE: &str = "history.csv";

/// One row of the collection-history log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the collection run finished.
    pub date: DateTime<Utc>,
    /// Video that was collected.
    pub video_id: String,
    /// Total comments classified.
    pub total: usize,
    /// Comments classified positive.
    pub positive: usize,
    /// Comments classified negative.
    pub negative: usize,
}

/// CSV dataset store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    root: PathBuf,
}

impl DatasetStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            SentiraError::storage(format!(
                "failed to create data directory {}: {e}",
                root.display()
            ))
        })?;
        Ok(DatasetStore { root })
    }

    /// Path of the per-video snapshot CSV.
    pub fn video_dataset_path(&self, video_id: &str) -> PathBuf {
        self.root.join(format!("comments_{video_id}.csv"))
    }

    /// Path of the aggregated master dataset.
    pub fn master_path(&self) -> PathBuf {
        self.root.join(MASTER_FILE)
    }

    /// Path of the collection-history log.
    pub fn history_path(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    /// Write the per-video snapshot dataset, replacing any previous one.
    pub fn write_video_dataset(
        &self,
        video_id: &str,
        records: &[CommentRecord],
    ) -> Result<PathBuf> {
        let path = self.video_dataset_path(video_id);
        write_records(&path, records)?;
        info!("wrote {} records to {}", records.len(), path.display());
        Ok(path)
    }

    /// Merge records for one video into the master dataset.
    ///
    /// Existing rows with the same `video_id` are replaced; everything else
    /// is carried over unchanged. A missing master dataset starts fresh; a
    /// present-but-unreadable one is a storage error, not something to
    /// silently recreate.
    pub fn merge_into_master(&self, video_id: &str, records: &[CommentRecord]) -> Result<usize> {
        let mut merged = self.read_master()?;
        merged.retain(|record| record.video_id != video_id);
        merged.extend_from_slice(records);

        write_records(&self.master_path(), &merged)?;
        info!(
            "master dataset now holds {} records after merging video {video_id}",
            merged.len()
        );
        Ok(merged.len())
    }

    /// Read the full master dataset. A missing file yields an empty list.
    pub fn read_master(&self) -> Result<Vec<CommentRecord>> {
        let path = self.master_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(&path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: CommentRecord = row.map_err(|e| {
                SentiraError::storage(format!(
                    "master dataset {} is unreadable: {e}",
                    path.display()
                ))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Append one entry to the collection-history log.
    pub fn append_history(&self, entry: &HistoryEntry) -> Result<()> {
        let path = self.history_path();
        let exists = path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = WriterBuilder::new().has_headers(!exists).from_writer(file);
        writer.serialize(entry)?;
        writer.flush()?;
        Ok(())
    }

    /// Read the full collection-history log, oldest first.
    pub fn read_history(&self) -> Result<Vec<HistoryEntry>> {
        let path = self.history_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(&path)?;
        let mut entries = Vec::new();
        for row in reader.deserialize() {
            entries.push(row?);
        }
        Ok(entries)
    }
}

fn write_records(path: &Path, records: &[CommentRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
