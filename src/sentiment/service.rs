//! Inference service over a loaded artifact pair.

use std::path::Path;

use log::info;

use crate::analysis::TextNormalizer;
use crate::error::Result;
use crate::sentiment::SentimentLabel;
use crate::sentiment::artifact;
use crate::sentiment::classifier::LogisticRegression;
use crate::sentiment::vectorizer::TfIdfVectorizer;

/// Single-comment sentiment scorer.
///
/// Constructed once at process start from the persisted artifact pair; any
/// load failure (missing file, corruption, mismatched pair) surfaces here,
/// before the first request. After construction the service is immutable —
/// it can be shared behind an `Arc` across callers without locking.
///
/// # Examples
///
/// ```no_run
/// use sentira::sentiment::SentimentService;
///
/// let service = SentimentService::load("model")?;
/// let label = service.predict("I love this video");
/// println!("{label}");
/// # Ok::<(), sentira::error::SentiraError>(())
/// ```
#[derive(Debug)]
pub struct SentimentService {
    normalizer: TextNormalizer,
    vectorizer: TfIdfVectorizer,
    classifier: LogisticRegression,
}

impl SentimentService {
    /// Load the artifact pair from `model_dir` and build the service.
    ///
    /// Fails fast: a service that cannot load its artifacts cannot serve
    /// any request, so the error belongs to startup, not to the first call.
    pub fn load<P: AsRef<Path>>(model_dir: P) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let (vectorizer, classifier) = artifact::load_pair(model_dir)?;
        info!(
            "loaded sentiment model from {} ({} features)",
            model_dir.display(),
            vectorizer.dimension()
        );
        Ok(SentimentService {
            normalizer: TextNormalizer::default(),
            vectorizer,
            classifier,
        })
    }

    /// Build a service from already-loaded artifacts.
    ///
    /// Used by tests to inject fitted fakes; production callers go through
    /// [`SentimentService::load`].
    pub fn from_parts(vectorizer: TfIdfVectorizer, classifier: LogisticRegression) -> Self {
        SentimentService {
            normalizer: TextNormalizer::default(),
            vectorizer,
            classifier,
        }
    }

    /// Score a single comment.
    ///
    /// Total and deterministic over any string input: unknown words fall
    /// out of the feature space, an empty or fully out-of-vocabulary
    /// comment is scored by the classifier's intercept alone, and the
    /// result is always one of the two labels.
    pub fn predict(&self, comment: &str) -> SentimentLabel {
        let normalized = self.normalizer.normalize(comment);
        // transform only fails on an unfitted vectorizer, which load/from_parts
        // never produce.
        match self.vectorizer.transform(&normalized) {
            Ok(vector) => self.classifier.predict(&vector),
            Err(_) => SentimentLabel::Negative,
        }
    }

    /// Positive-class probability for a single comment.
    pub fn score(&self, comment: &str) -> f64 {
        let normalized = self.normalizer.normalize(comment);
        match self.vectorizer.transform(&normalized) {
            Ok(vector) => self.classifier.probability(&vector),
            Err(_) => 0.0,
        }
    }

    /// Score a batch of comments.
    ///
    /// Purely a convenience loop; single-item semantics are unchanged.
    pub fn predict_batch<S: AsRef<str>>(&self, comments: &[S]) -> Vec<SentimentLabel> {
        comments
            .iter()
            .map(|comment| self.predict(comment.as_ref()))
            .collect()
    }

    /// Dimension of the loaded feature space.
    pub fn dimension(&self) -> usize {
        self.vectorizer.dimension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::classifier::TrainOptions;

    fn trained_service() -> SentimentService {
        let texts = ["i love this", "i hate this", "this is great", "this is terrible"];
        let labels = [
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Positive,
            SentimentLabel::Negative,
        ];

        let documents: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&documents).unwrap();

        let examples: Vec<_> = documents
            .iter()
            .zip(labels)
            .flat_map(|(text, label)| {
                let vector = vectorizer.transform(text).unwrap();
                std::iter::repeat_n((vector, label), 10)
            })
            .collect();

        let mut classifier = LogisticRegression::new(vectorizer.dimension());
        classifier.train(&examples, &TrainOptions::default()).unwrap();

        SentimentService::from_parts(vectorizer, classifier)
    }

    #[test]
    fn test_predict_separates_trained_phrases() {
        let service = trained_service();
        assert_eq!(service.predict("I love this"), SentimentLabel::Positive);
        assert_eq!(service.predict("I hate this"), SentimentLabel::Negative);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let service = trained_service();
        let first = service.predict("some arbitrary comment");
        for _ in 0..5 {
            assert_eq!(service.predict("some arbitrary comment"), first);
        }
    }

    #[test]
    fn test_predict_total_over_odd_inputs() {
        let service = trained_service();
        for input in ["", "12345", "🎉🎉🎉", "\0", "   "] {
            // Label closure: any input maps to one of the two labels.
            let label = service.predict(input);
            assert!(matches!(
                label,
                SentimentLabel::Positive | SentimentLabel::Negative
            ));
        }
    }

    #[test]
    fn test_score_matches_predict_threshold() {
        let service = trained_service();
        for input in ["I love this", "I hate this", "whatever"] {
            let score = service.score(input);
            let expected = if score >= 0.5 {
                SentimentLabel::Positive
            } else {
                SentimentLabel::Negative
            };
            assert_eq!(service.predict(input), expected);
        }
    }

    #[test]
    fn test_predict_batch_matches_single_calls() {
        let service = trained_service();
        let comments = ["I love this", "I hate this"];
        let batch = service.predict_batch(&comments);
        let singles: Vec<_> = comments.iter().map(|c| service.predict(c)).collect();
        assert_eq!(batch, singles);
    }

    #[test]
    fn test_load_missing_dir_fails_fast() {
        assert!(SentimentService::load("/nonexistent/model").is_err());
    }
}
