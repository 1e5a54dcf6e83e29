//! Ingestion pipeline scenarios with an in-memory comment source.

use std::io::Write;

use chrono::Utc;
use sentira::collect::CommentCollector;
use sentira::sentiment::{SentimentService, TrainingPipeline};
use sentira::source::{RawComment, StaticCommentSource};
use sentira::store::{CommentStore, DatasetStore, SqliteCommentStore};

fn trained_service(model_dir: &std::path::Path) -> SentimentService {
    let mut corpus = tempfile::NamedTempFile::new().unwrap();
    for i in 0..10 {
        writeln!(corpus, "4,{i}a,d,q,u,I love this!").unwrap();
        writeln!(corpus, "0,{i}b,d,q,u,I hate this!").unwrap();
        writeln!(corpus, "4,{i}c,d,q,u,This is great").unwrap();
        writeln!(corpus, "0,{i}d,d,q,u,This is terrible").unwrap();
    }
    corpus.flush().unwrap();

    TrainingPipeline::default()
        .run(corpus.path(), model_dir)
        .unwrap();
    SentimentService::load(model_dir).unwrap()
}

fn comment(video_id: &str, text: &str) -> RawComment {
    RawComment {
        video_id: video_id.to_string(),
        text: text.to_string(),
        timestamp: Utc::now(),
    }
}

#[test]
fn test_collect_classifies_and_persists() {
    let model_dir = tempfile::tempdir().unwrap();
    let data_dir = tempfile::tempdir().unwrap();
    let service = trained_service(model_dir.path());
    let datasets = DatasetStore::new(data_dir.path()).unwrap();
    let database = SqliteCommentStore::open(data_dir.path().join("comments.db")).unwrap();

    let source = StaticCommentSource::new(vec![
        comment("A", "I love this"),
        comment("A", "I hate this"),
        comment("A", "this is great"),
    ]);

    let collector = CommentCollector::new(&source, &service, &datasets, Some(&database));
    let summary = collector.collect("A").unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.positive + summary.negative, 3);
    assert_eq!(summary.skipped, 0);
    assert!(summary.db_persisted);
    assert!(summary.dataset_path.as_ref().unwrap().exists());

    // Flat files and relational store agree on the row count.
    assert_eq!(datasets.read_master().unwrap().len(), 3);
    assert_eq!(database.fetch_all().unwrap().len(), 3);
    assert_eq!(datasets.read_history().unwrap().len(), 1);
}

#[test]
fn test_recollecting_a_video_replaces_master_rows() {
    let model_dir = tempfile::tempdir().unwrap();
    let data_dir = tempfile::tempdir().unwrap();
    let service = trained_service(model_dir.path());
    let datasets = DatasetStore::new(data_dir.path()).unwrap();

    let first = StaticCommentSource::new(vec![
        comment("A", "old comment one"),
        comment("A", "old comment two"),
        comment("B", "b comment"),
    ]);
    let collector = CommentCollector::new(&first, &service, &datasets, None);
    collector.collect("A").unwrap();
    collector.collect("B").unwrap();
    assert_eq!(datasets.read_master().unwrap().len(), 3);

    // Re-collect A with fresh comments: its two old rows must be replaced,
    // B's row untouched.
    let second = StaticCommentSource::new(vec![comment("A", "the new comment")]);
    let collector = CommentCollector::new(&second, &service, &datasets, None);
    let summary = collector.collect("A").unwrap();
    assert_eq!(summary.total, 1);

    let master = datasets.read_master().unwrap();
    assert_eq!(master.len(), 2);
    let a_rows: Vec<_> = master.iter().filter(|r| r.video_id == "A").collect();
    assert_eq!(a_rows.len(), 1);
    assert_eq!(a_rows[0].comment, "the new comment");
    assert!(master.iter().any(|r| r.video_id == "B"));
}

#[test]
fn test_collect_with_no_comments_touches_nothing() {
    let model_dir = tempfile::tempdir().unwrap();
    let data_dir = tempfile::tempdir().unwrap();
    let service = trained_service(model_dir.path());
    let datasets = DatasetStore::new(data_dir.path()).unwrap();

    let source = StaticCommentSource::new(vec![]);
    let collector = CommentCollector::new(&source, &service, &datasets, None);
    let summary = collector.collect("A").unwrap();

    assert_eq!(summary.total, 0);
    assert!(summary.dataset_path.is_none());
    assert!(!summary.db_persisted);
    assert!(datasets.read_master().unwrap().is_empty());
    assert!(datasets.read_history().unwrap().is_empty());
}

#[test]
fn test_collect_without_database_still_writes_datasets() {
    let model_dir = tempfile::tempdir().unwrap();
    let data_dir = tempfile::tempdir().unwrap();
    let service = trained_service(model_dir.path());
    let datasets = DatasetStore::new(data_dir.path()).unwrap();

    let source = StaticCommentSource::new(vec![comment("A", "I love this")]);
    let collector = CommentCollector::new(&source, &service, &datasets, None);
    let summary = collector.collect("A").unwrap();

    assert_eq!(summary.total, 1);
    assert!(!summary.db_persisted);
    assert_eq!(datasets.read_master().unwrap().len(), 1);
}

#[test]
fn test_empty_comment_text_is_classified_not_skipped() {
    let model_dir = tempfile::tempdir().unwrap();
    let data_dir = tempfile::tempdir().unwrap();
    let service = trained_service(model_dir.path());
    let datasets = DatasetStore::new(data_dir.path()).unwrap();

    // An upstream item without text arrives as the empty string.
    let source = StaticCommentSource::new(vec![comment("A", "")]);
    let collector = CommentCollector::new(&source, &service, &datasets, None);
    let summary = collector.collect("A").unwrap();

    assert_eq!(summary.total, 1);
    assert_eq!(summary.skipped, 0);
}
