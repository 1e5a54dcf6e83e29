//! Text normalizer composed from char filters.
//!
//! The normalizer is the correctness-critical seam of the sentiment
//! pipeline: the vectorizer is fit on normalized text, so inference must
//! normalize with the same chain to stay in the learned feature space.
//!
//! # Examples
//!
//! ```
//! use sentira::analysis::TextNormalizer;
//!
//! let normalizer = TextNormalizer::default();
//! assert_eq!(normalizer.normalize("I rate it 10/10!"), "i rate it       ");
//! assert_eq!(normalizer.normalize(""), "");
//! ```

use std::sync::Arc;

use crate::analysis::char_filter::{AlphabeticFilter, CharFilter, LowercaseCharFilter};

/// A pipeline of char filters applied in order.
///
/// The default chain replaces every non-ASCII-alphabetic character with a
/// single space and lowercases the rest. The output alphabet is lowercase
/// `a-z` plus space, which makes the default chain its own fixed point:
/// normalizing already-normalized text changes nothing. No trimming or
/// whitespace collapsing is performed.
#[derive(Clone)]
pub struct TextNormalizer {
    filters: Vec<Arc<dyn CharFilter>>,
}

impl TextNormalizer {
    /// Create a normalizer with no filters (identity).
    pub fn new() -> Self {
        TextNormalizer {
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the end of the chain.
    pub fn add_filter(mut self, filter: Arc<dyn CharFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Get the filters in this chain.
    pub fn filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.filters
    }

    /// Normalize text by running it through every filter in order.
    ///
    /// Pure and total: the same input always yields the same output, and no
    /// input can fail.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = text.to_string();
        for filter in &self.filters {
            current = filter.filter(&current);
        }
        current
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        TextNormalizer::new()
            .add_filter(Arc::new(AlphabeticFilter::new()))
            .add_filter(Arc::new(LowercaseCharFilter::new()))
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.filters.iter().map(|c| c.name()).collect();
        f.debug_struct("TextNormalizer")
            .field("filters", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_symbols() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("Hello, World!"), "hello  world ");
    }

    #[test]
    fn test_normalize_digits_become_spaces() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("123"), "   ");
    }

    #[test]
    fn test_normalize_empty_input() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize(""), "");
    }

    #[test]
    fn test_normalize_is_a_fixed_point() {
        let normalizer = TextNormalizer::default();
        for input in ["MiXeD CaSe 42!", "already lower", "", "émoji 🎉 text"] {
            let once = normalizer.normalize(input);
            let twice = normalizer.normalize(&once);
            assert_eq!(once, twice, "double normalization changed {input:?}");
        }
    }

    #[test]
    fn test_normalize_does_not_collapse_runs() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("a - b"), "a   b");
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("Keep AS-IS 42"), "Keep AS-IS 42");
    }
}
