//! Tokenizer implementations for text analysis.

/// Trait for tokenizers that convert text into terms.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a list of terms.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits text on whitespace runs.
///
/// Runs of multiple spaces, as produced by the normalizer, count as a single
/// separator and never yield empty terms.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(|s| s.to_string()).collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
