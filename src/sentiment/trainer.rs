//! Batch training pipeline.
//!
//! One-shot job: load the labeled corpus, normalize it, fit the vectorizer
//! on the full corpus, split into train/eval partitions, train the
//! classifier, report held-out accuracy, persist the artifact pair.
//!
//! Accuracy is a diagnostic, not a gate — a low score is reported and the
//! artifacts are saved anyway. Reproducibility is likewise not a goal: the
//! train/eval split and the epoch ordering are freshly randomized per run.
//!
//! The pipeline owns exclusive write access to its model directory for the
//! duration of a run. Two concurrent runs against the same directory are an
//! operational error; there is no coordination, last writer wins.

use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::TextNormalizer;
use crate::corpus::CorpusReader;
use crate::error::{Result, SentiraError};
use crate::sentiment::SentimentLabel;
use crate::sentiment::artifact::{self, CLASSIFIER_FILE, VECTORIZER_FILE};
use crate::sentiment::classifier::{LogisticRegression, TrainOptions};
use crate::sentiment::vectorizer::{DEFAULT_MAX_FEATURES, FeatureVector, TfIdfVectorizer};

/// Configuration for a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Vocabulary size cap for the vectorizer.
    pub max_features: usize,
    /// Fraction of the corpus held out for evaluation.
    pub test_fraction: f64,
    /// Classifier training passes.
    pub epochs: usize,
    /// Classifier SGD step size.
    pub learning_rate: f64,
    /// Classifier L2 regularization strength.
    pub l2: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        let options = TrainOptions::default();
        TrainerConfig {
            max_features: DEFAULT_MAX_FEATURES,
            test_fraction: 0.2,
            epochs: options.epochs,
            learning_rate: options.learning_rate,
            l2: options.l2,
        }
    }
}

impl TrainerConfig {
    fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(SentiraError::config("max_features must be positive"));
        }
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(SentiraError::config(format!(
                "test_fraction must be in [0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.epochs == 0 {
            return Err(SentiraError::config("epochs must be positive"));
        }
        Ok(())
    }

    fn train_options(&self) -> TrainOptions {
        TrainOptions {
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            l2: self.l2,
        }
    }
}

/// Outcome of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Labeled examples used.
    pub examples: usize,
    /// Corpus rows dropped for out-of-range polarity.
    pub skipped_rows: usize,
    /// Size of the fitted vocabulary.
    pub vocabulary_size: usize,
    /// Training partition size.
    pub train_examples: usize,
    /// Evaluation partition size.
    pub eval_examples: usize,
    /// Held-out accuracy; absent when the evaluation partition is empty.
    pub accuracy: Option<f64>,
    /// Id shared by the persisted artifact pair.
    pub pair_id: Uuid,
    /// Path the vectorizer artifact was written to.
    pub vectorizer_path: PathBuf,
    /// Path the classifier artifact was written to.
    pub classifier_path: PathBuf,
}

/// The offline training pipeline.
#[derive(Debug, Clone, Default)]
pub struct TrainingPipeline {
    config: TrainerConfig,
}

impl TrainingPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: TrainerConfig) -> Self {
        TrainingPipeline { config }
    }

    /// Run the pipeline: corpus in, artifact pair out.
    ///
    /// Any failure before the final persist step leaves the model directory
    /// untouched.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        corpus_path: P,
        model_dir: Q,
    ) -> Result<TrainingReport> {
        self.config.validate()?;
        let model_dir = model_dir.as_ref();

        info!("loading corpus from {}", corpus_path.as_ref().display());
        let corpus = CorpusReader::new().load(corpus_path)?;
        if corpus.examples.is_empty() {
            return Err(SentiraError::corpus("corpus contains no usable examples"));
        }

        info!("normalizing {} examples", corpus.examples.len());
        let normalizer = TextNormalizer::default();
        let documents: Vec<String> = corpus
            .examples
            .iter()
            .map(|example| normalizer.normalize(&example.text))
            .collect();

        info!(
            "fitting vectorizer (max {} features)",
            self.config.max_features
        );
        let mut vectorizer = TfIdfVectorizer::with_max_features(self.config.max_features);
        vectorizer.fit(&documents)?;
        info!("vocabulary size: {}", vectorizer.dimension());

        let mut vectors = Vec::with_capacity(documents.len());
        for (document, example) in documents.iter().zip(corpus.examples.iter()) {
            vectors.push((vectorizer.transform(document)?, example.label));
        }

        let (train, eval) = split(vectors, self.config.test_fraction);
        info!(
            "split corpus into {} train / {} eval examples",
            train.len(),
            eval.len()
        );

        info!("training classifier for {} epochs", self.config.epochs);
        let mut classifier = LogisticRegression::new(vectorizer.dimension());
        classifier.train(&train, &self.config.train_options())?;

        let accuracy = classifier.accuracy(&eval);
        match accuracy {
            Some(value) => info!("held-out accuracy: {value:.4}"),
            None => warn!("evaluation partition is empty, skipping accuracy"),
        }

        let pair_id = artifact::save_pair(model_dir, &vectorizer, &classifier)?;

        Ok(TrainingReport {
            examples: corpus.examples.len(),
            skipped_rows: corpus.skipped_rows,
            vocabulary_size: vectorizer.dimension(),
            train_examples: train.len(),
            eval_examples: eval.len(),
            accuracy,
            pair_id,
            vectorizer_path: model_dir.join(VECTORIZER_FILE),
            classifier_path: model_dir.join(CLASSIFIER_FILE),
        })
    }
}

type Partition = Vec<(FeatureVector, SentimentLabel)>;

/// Randomly shuffle and split labeled vectors into train/eval partitions.
///
/// The evaluation partition never swallows the whole corpus: at least one
/// example always remains on the training side.
fn split(mut vectors: Partition, test_fraction: f64) -> (Partition, Partition) {
    let mut rng = rand::rng();
    vectors.shuffle(&mut rng);

    let n = vectors.len();
    let n_eval = ((n as f64) * test_fraction).round() as usize;
    let n_eval = n_eval.min(n.saturating_sub(1));

    let eval = vectors.split_off(n - n_eval);
    (vectors, eval)
}
