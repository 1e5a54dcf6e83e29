//! TF-IDF vectorizer for text feature extraction.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::{Tokenizer, WhitespaceTokenizer};
use crate::error::{Result, SentiraError};

/// Default cap on the vocabulary size.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// A sparse feature vector in the vectorizer's term space.
///
/// Indices are strictly increasing and paired with non-zero values. A
/// document containing no in-vocabulary terms yields the empty vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Dimension of the full feature space.
    pub dimension: usize,
    /// Indices of non-zero components, ascending.
    pub indices: Vec<u32>,
    /// Values of the non-zero components.
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// The empty vector in a space of the given dimension.
    pub fn empty(dimension: usize) -> Self {
        FeatureVector {
            dimension,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of non-zero components.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Iterate over `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .zip(self.values.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

/// TF-IDF vectorizer with a capped vocabulary.
///
/// Fit once on the full normalized training corpus; after fitting it maps
/// any normalized text into the fixed feature space it learned. The
/// vocabulary keeps the `max_features` most frequent terms (by corpus-wide
/// term count, ties broken alphabetically) and assigns indices in
/// lexicographic term order. IDF uses the smoothed form
/// `ln((1 + n) / (1 + df)) + 1`, and transformed vectors are L2-normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each index.
    idf: Vec<f64>,
    /// Number of documents seen at fit time.
    n_documents: usize,
    /// Vocabulary size cap.
    max_features: usize,
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer with the default vocabulary cap.
    pub fn new() -> Self {
        Self::with_max_features(DEFAULT_MAX_FEATURES)
    }

    /// Create an unfitted vectorizer with the given vocabulary cap.
    pub fn with_max_features(max_features: usize) -> Self {
        TfIdfVectorizer {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            max_features,
        }
    }

    /// Whether `fit` has been called.
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Dimension of the feature space (0 before fitting).
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fit on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Vocabulary size cap.
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Fit the vectorizer on normalized training documents.
    ///
    /// The vectorizer is immutable once fitted; calling `fit` again is an
    /// invalid operation, not a refit.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if self.is_fitted() {
            return Err(SentiraError::invalid_operation(
                "vectorizer is already fitted",
            ));
        }
        if documents.is_empty() {
            return Err(SentiraError::model("cannot fit vectorizer on an empty corpus"));
        }

        let tokenizer = WhitespaceTokenizer::new();
        let mut term_counts: HashMap<String, u64> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenizer.tokenize(doc);
            for token in &tokens {
                *term_counts.entry(token.clone()).or_insert(0) += 1;
            }
            let unique: HashSet<_> = tokens.into_iter().collect();
            for token in unique {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        // Keep the most frequent terms, then index them in lexicographic
        // order so the mapping is independent of hash iteration order.
        let mut ranked: Vec<(&String, &u64)> = term_counts.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut kept: Vec<String> = ranked.into_iter().map(|(term, _)| term.clone()).collect();
        kept.sort();

        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = vec![0.0; kept.len()];
        let n = documents.len() as f64;
        for (idx, term) in kept.into_iter().enumerate() {
            let df = *document_frequency.get(&term).unwrap_or(&0) as f64;
            idf[idx] = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
            vocabulary.insert(term, idx);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = documents.len();

        Ok(())
    }

    /// Transform a normalized document into a TF-IDF feature vector.
    ///
    /// Out-of-vocabulary terms are dropped. The result is L2-normalized;
    /// a document with no in-vocabulary terms yields the empty vector.
    pub fn transform(&self, document: &str) -> Result<FeatureVector> {
        if !self.is_fitted() {
            return Err(SentiraError::invalid_operation(
                "vectorizer is not fitted",
            ));
        }

        let tokenizer = WhitespaceTokenizer::new();
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenizer.tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut indices = Vec::with_capacity(counts.len());
        let mut values = Vec::with_capacity(counts.len());
        for (idx, count) in counts {
            indices.push(idx as u32);
            values.push(count * self.idf[idx]);
        }

        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut values {
                *value /= norm;
            }
        }

        Ok(FeatureVector {
            dimension: self.dimension(),
            indices,
            values,
        })
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fit_builds_capped_vocabulary() {
        let mut vectorizer = TfIdfVectorizer::with_max_features(2);
        vectorizer
            .fit(&docs(&["apple apple banana", "apple cherry"]))
            .unwrap();

        // "apple" (3 occurrences) and "banana" (ties with "cherry" at 1,
        // broken alphabetically) survive the cap.
        assert_eq!(vectorizer.dimension(), 2);
        let v = vectorizer.transform("banana cherry").unwrap();
        assert_eq!(v.nnz(), 1);
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&docs(&["good movie", "bad movie", "good good plot"]))
            .unwrap();

        let v = vectorizer.transform("good bad movie").unwrap();
        assert!((v.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_unknown_terms_yield_empty_vector() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&docs(&["known words only"])).unwrap();

        let v = vectorizer.transform("completely different").unwrap();
        assert_eq!(v.nnz(), 0);
        assert_eq!(v.dimension, vectorizer.dimension());
    }

    #[test]
    fn test_transform_empty_document() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&docs(&["some text"])).unwrap();

        let v = vectorizer.transform("").unwrap();
        assert_eq!(v.nnz(), 0);
    }

    #[test]
    fn test_fit_twice_is_invalid() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&docs(&["one doc"])).unwrap();
        assert!(vectorizer.fit(&docs(&["another"])).is_err());
    }

    #[test]
    fn test_fit_empty_corpus_is_an_error() {
        let mut vectorizer = TfIdfVectorizer::new();
        assert!(vectorizer.fit(&[]).is_err());
    }

    #[test]
    fn test_transform_before_fit_is_invalid() {
        let vectorizer = TfIdfVectorizer::new();
        assert!(vectorizer.transform("anything").is_err());
    }

    #[test]
    fn test_indices_are_ascending() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&docs(&["zebra apple mango", "apple zebra"]))
            .unwrap();

        let v = vectorizer.transform("zebra apple mango").unwrap();
        let mut sorted = v.indices.clone();
        sorted.sort_unstable();
        assert_eq!(v.indices, sorted);
        assert_eq!(v.nnz(), 3);
    }

    #[test]
    fn test_serde_roundtrip_preserves_feature_space() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&docs(&["i love this", "i hate this"]))
            .unwrap();

        let bytes = bincode::serialize(&vectorizer).unwrap();
        let restored: TfIdfVectorizer = bincode::deserialize(&bytes).unwrap();

        let a = vectorizer.transform("love this").unwrap();
        let b = restored.transform("love this").unwrap();
        assert_eq!(a, b);
    }
}
