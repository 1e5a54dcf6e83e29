//! Linear binary classifier over TF-IDF feature vectors.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentiraError};
use crate::sentiment::SentimentLabel;
use crate::sentiment::vectorizer::FeatureVector;

/// Options controlling logistic-regression training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainOptions {
    /// Number of passes over the training partition.
    pub epochs: usize,
    /// SGD step size.
    pub learning_rate: f64,
    /// L2 regularization strength.
    pub l2: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions {
            epochs: 30,
            learning_rate: 0.5,
            l2: 1e-4,
        }
    }
}

/// Logistic regression: a linear decision function producing a probability,
/// thresholded at 0.5.
///
/// Weights are dense over the vectorizer's feature space; training iterates
/// over sparse vectors so only the touched components are updated per
/// example. Prediction is deterministic; the randomness in training (example
/// order shuffling) never reaches inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// One weight per feature dimension.
    weights: Vec<f64>,
    /// Intercept term.
    bias: f64,
}

impl LogisticRegression {
    /// Create an untrained classifier for a feature space of the given
    /// dimension. All weights start at zero.
    pub fn new(dimension: usize) -> Self {
        LogisticRegression {
            weights: vec![0.0; dimension],
            bias: 0.0,
        }
    }

    /// Dimension of the feature space this classifier expects.
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    /// Train with SGD on labeled feature vectors.
    ///
    /// Example order is reshuffled every epoch. No convergence gate: the
    /// configured number of epochs always runs to completion.
    pub fn train(
        &mut self,
        examples: &[(FeatureVector, SentimentLabel)],
        options: &TrainOptions,
    ) -> Result<()> {
        if examples.is_empty() {
            return Err(SentiraError::model(
                "cannot train classifier on an empty partition",
            ));
        }
        for (vector, _) in examples {
            if vector.dimension != self.dimension() {
                return Err(SentiraError::model(format!(
                    "feature vector dimension {} does not match classifier dimension {}",
                    vector.dimension,
                    self.dimension()
                )));
            }
        }

        let mut order: Vec<usize> = (0..examples.len()).collect();
        let mut rng = rand::rng();

        for _ in 0..options.epochs {
            order.shuffle(&mut rng);
            for &i in &order {
                let (vector, label) = &examples[i];
                let error = self.probability(vector) - label.target();

                for (idx, value) in vector.iter() {
                    let gradient = error * value + options.l2 * self.weights[idx];
                    self.weights[idx] -= options.learning_rate * gradient;
                }
                self.bias -= options.learning_rate * error;
            }
        }

        Ok(())
    }

    /// Raw linear score `w . x + b`.
    pub fn decision_function(&self, vector: &FeatureVector) -> f64 {
        let mut score = self.bias;
        for (idx, value) in vector.iter() {
            score += self.weights[idx] * value;
        }
        score
    }

    /// Positive-class probability.
    pub fn probability(&self, vector: &FeatureVector) -> f64 {
        sigmoid(self.decision_function(vector))
    }

    /// Predicted label, thresholded at 0.5.
    pub fn predict(&self, vector: &FeatureVector) -> SentimentLabel {
        if self.probability(vector) >= 0.5 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        }
    }

    /// Accuracy over labeled feature vectors. `None` when the slice is
    /// empty.
    pub fn accuracy(&self, examples: &[(FeatureVector, SentimentLabel)]) -> Option<f64> {
        if examples.is_empty() {
            return None;
        }
        let correct = examples
            .iter()
            .filter(|(vector, label)| self.predict(vector) == *label)
            .count();
        Some(correct as f64 / examples.len() as f64)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
