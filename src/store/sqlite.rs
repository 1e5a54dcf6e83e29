//! SQLite-backed relational comment store.
//!
//! sqlx is async; the rest of the pipeline is synchronous by design, so the
//! store owns a small current-thread tokio runtime and blocks on each
//! operation. Callers see a plain synchronous API.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tokio::runtime::Runtime;

use crate::error::{Result, SentiraError};
use crate::sentiment::SentimentLabel;
use crate::store::{CommentRecord, CommentStore};

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    video_id TEXT NOT NULL,
    comment TEXT NOT NULL,
    sentiment TEXT NOT NULL,
    timestamp TEXT NOT NULL
)";

/// Relational store for classified comments.
pub struct SqliteCommentStore {
    runtime: Runtime,
    pool: SqlitePool,
}

impl SqliteCommentStore {
    /// Open (or create) the database at `path` and ensure the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = runtime
            .block_on(
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .connect_with(options),
            )
            .map_err(|e| {
                SentiraError::storage(format!("failed to open database {}: {e}", path.display()))
            })?;

        runtime
            .block_on(sqlx::query(CREATE_TABLE).execute(&pool))
            .map_err(|e| SentiraError::storage(format!("failed to create comments table: {e}")))?;

        info!("opened comment database at {}", path.display());
        Ok(SqliteCommentStore { runtime, pool })
    }

    /// Count stored comments per sentiment label: `(positive, negative)`.
    pub fn count_by_sentiment(&self) -> Result<(u64, u64)> {
        let rows = self
            .runtime
            .block_on(
                sqlx::query("SELECT sentiment, COUNT(*) AS n FROM comments GROUP BY sentiment")
                    .fetch_all(&self.pool),
            )
            .map_err(|e| SentiraError::storage(format!("count query failed: {e}")))?;

        let mut positive = 0u64;
        let mut negative = 0u64;
        for row in rows {
            let sentiment: String = row
                .try_get("sentiment")
                .map_err(|e| SentiraError::storage(format!("malformed count row: {e}")))?;
            let count: i64 = row
                .try_get("n")
                .map_err(|e| SentiraError::storage(format!("malformed count row: {e}")))?;
            match sentiment.as_str() {
                "positive" => positive = count as u64,
                "negative" => negative = count as u64,
                _ => {}
            }
        }
        Ok((positive, negative))
    }
}

impl CommentStore for SqliteCommentStore {
    fn insert_comments(&self, records: &[CommentRecord]) -> Result<()> {
        self.runtime
            .block_on(async {
                let mut tx = self.pool.begin().await?;
                for record in records {
                    sqlx::query(
                        "INSERT INTO comments (video_id, comment, sentiment, timestamp) \
                         VALUES (?, ?, ?, ?)",
                    )
                    .bind(record.video_id.as_str())
                    .bind(record.comment.as_str())
                    .bind(record.sentiment.as_str())
                    .bind(record.timestamp.to_rfc3339())
                    .execute(&mut tx)
                    .await?;
                }
                tx.commit().await
            })
            .map_err(|e: sqlx::Error| SentiraError::storage(format!("insert failed: {e}")))?;

        info!("inserted {} records into comment database", records.len());
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<CommentRecord>> {
        let rows = self
            .runtime
            .block_on(
                sqlx::query(
                    "SELECT video_id, comment, sentiment, timestamp FROM comments ORDER BY id",
                )
                .fetch_all(&self.pool),
            )
            .map_err(|e| SentiraError::storage(format!("fetch query failed: {e}")))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(record_from_row(&row)?);
        }
        Ok(records)
    }
}

impl std::fmt::Debug for SqliteCommentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCommentStore").finish_non_exhaustive()
    }
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<CommentRecord> {
    let video_id: String = row
        .try_get("video_id")
        .map_err(|e| SentiraError::storage(format!("malformed comment row: {e}")))?;
    let comment: String = row
        .try_get("comment")
        .map_err(|e| SentiraError::storage(format!("malformed comment row: {e}")))?;
    let sentiment: String = row
        .try_get("sentiment")
        .map_err(|e| SentiraError::storage(format!("malformed comment row: {e}")))?;
    let timestamp: String = row
        .try_get("timestamp")
        .map_err(|e| SentiraError::storage(format!("malformed comment row: {e}")))?;

    let sentiment: SentimentLabel = sentiment
        .parse()
        .map_err(|_| SentiraError::storage(format!("unknown sentiment in database: {sentiment:?}")))?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| SentiraError::storage(format!("bad timestamp in database: {e}")))?
        .with_timezone(&Utc);

    Ok(CommentRecord {
        video_id,
        comment,
        sentiment,
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(video_id: &str, sentiment: SentimentLabel) -> CommentRecord {
        CommentRecord {
            video_id: video_id.to_string(),
            comment: "some comment".to_string(),
            sentiment,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_open_insert_fetch_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteCommentStore::open(dir.path().join("comments.db")).unwrap();

        store
            .insert_comments(&[
                record("A", SentimentLabel::Positive),
                record("A", SentimentLabel::Negative),
                record("B", SentimentLabel::Positive),
            ])
            .unwrap();

        let all = store.fetch_all().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].video_id, "A");
        assert_eq!(all[2].video_id, "B");
    }

    #[test]
    fn test_count_by_sentiment() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteCommentStore::open(dir.path().join("comments.db")).unwrap();

        store
            .insert_comments(&[
                record("A", SentimentLabel::Positive),
                record("A", SentimentLabel::Positive),
                record("B", SentimentLabel::Negative),
            ])
            .unwrap();

        assert_eq!(store.count_by_sentiment().unwrap(), (2, 1));
    }

    #[test]
    fn test_reopen_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.db");

        {
            let store = SqliteCommentStore::open(&path).unwrap();
            store
                .insert_comments(&[record("A", SentimentLabel::Positive)])
                .unwrap();
        }

        let store = SqliteCommentStore::open(&path).unwrap();
        assert_eq!(store.fetch_all().unwrap().len(), 1);
    }
}
