//! Summary statistics over collected comments.

use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentLabel;
use crate::store::CommentRecord;

/// Length and sentiment statistics over a set of comment records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentStats {
    /// Number of comments.
    pub total: usize,
    /// Comments classified positive.
    pub positive: usize,
    /// Comments classified negative.
    pub negative: usize,
    /// Mean comment length in characters.
    pub average_length: f64,
    /// Median comment length in characters.
    pub median_length: f64,
    /// Longest comment length.
    pub max_length: usize,
    /// Shortest comment length.
    pub min_length: usize,
}

impl CommentStats {
    /// Compute statistics over the given records.
    pub fn compute(records: &[CommentRecord]) -> Self {
        if records.is_empty() {
            return CommentStats {
                total: 0,
                positive: 0,
                negative: 0,
                average_length: 0.0,
                median_length: 0.0,
                max_length: 0,
                min_length: 0,
            };
        }

        let mut lengths: Vec<usize> = records
            .iter()
            .map(|record| record.comment.chars().count())
            .collect();
        lengths.sort_unstable();

        let total = lengths.len();
        let sum: usize = lengths.iter().sum();
        let median = if total % 2 == 1 {
            lengths[total / 2] as f64
        } else {
            (lengths[total / 2 - 1] + lengths[total / 2]) as f64 / 2.0
        };
        let positive = records
            .iter()
            .filter(|r| r.sentiment == SentimentLabel::Positive)
            .count();

        CommentStats {
            total,
            positive,
            negative: total - positive,
            average_length: sum as f64 / total as f64,
            median_length: median,
            max_length: lengths[total - 1],
            min_length: lengths[0],
        }
    }
}
