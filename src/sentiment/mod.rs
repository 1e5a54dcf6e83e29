//! Sentiment classification pipeline.
//!
//! The pipeline has two halves used at different times, on potentially
//! different machines:
//!
//! - [`trainer::TrainingPipeline`] is a one-shot batch job that fits a
//!   TF-IDF vectorizer and a logistic-regression classifier on a labeled
//!   corpus and persists them as a matched artifact pair.
//! - [`service::SentimentService`] loads that pair once per process and
//!   answers single-comment scoring requests.
//!
//! Both halves share the analysis chain in [`crate::analysis`]; keeping that
//! chain identical is what guarantees the feature space at inference time
//! matches the one learned at fit time.

pub mod artifact;
pub mod classifier;
pub mod service;
pub mod trainer;
pub mod vectorizer;

pub use artifact::{load_pair, save_pair};
pub use classifier::{LogisticRegression, TrainOptions};
pub use service::SentimentService;
pub use trainer::{TrainerConfig, TrainingPipeline, TrainingReport};
pub use vectorizer::{FeatureVector, TfIdfVectorizer};

use serde::{Deserialize, Serialize};

/// Binary sentiment label.
///
/// The canonical string forms are `"positive"` and `"negative"`; these are
/// what the CLI prints, the datasets persist, and the relational store
/// holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Positive sentiment.
    Positive,
    /// Negative sentiment.
    Negative,
}

impl SentimentLabel {
    /// The canonical lowercase string form of this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
        }
    }

    /// The regression target used during training.
    pub fn target(&self) -> f64 {
        match self {
            SentimentLabel::Positive => 1.0,
            SentimentLabel::Negative => 0.0,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = crate::error::SentiraError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            other => Err(crate::error::SentiraError::invalid_operation(format!(
                "unknown sentiment label: {other:?}"
            ))),
        }
    }
}
