//! Char filters that rewrite raw text before tokenization.
//!
//! A char filter maps a string to a string. Filters are composed by
//! [`TextNormalizer`](crate::analysis::normalizer::TextNormalizer), which
//! applies them in order.

/// Trait for filters that transform raw text character-wise.
pub trait CharFilter: Send + Sync {
    /// Apply the filter to the input text, producing the rewritten text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A filter that replaces every character outside `A-Z`/`a-z` with a single
/// space.
///
/// Existing spaces are preserved (they are themselves non-alphabetic and map
/// to a space). Runs of punctuation or digits therefore become runs of
/// spaces; no collapsing is performed here, downstream tokenization treats
/// any whitespace run as one separator.
///
/// # Examples
///
/// ```
/// use sentira::analysis::char_filter::{AlphabeticFilter, CharFilter};
///
/// let filter = AlphabeticFilter::new();
/// assert_eq!(filter.filter("It's 10/10!"), "It s       ");
/// ```
#[derive(Clone, Debug, Default)]
pub struct AlphabeticFilter;

impl AlphabeticFilter {
    /// Create a new alphabetic filter.
    pub fn new() -> Self {
        AlphabeticFilter
    }
}

impl CharFilter for AlphabeticFilter {
    fn filter(&self, input: &str) -> String {
        input
            .chars()
            .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
            .collect()
    }

    fn name(&self) -> &'static str {
        "alphabetic"
    }
}

/// A filter that lowercases all text.
///
/// Operates at the char level so it composes with other char filters before
/// tokenization. Input that has already passed [`AlphabeticFilter`] is pure
/// ASCII, for which `to_ascii_lowercase` is exact.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_ascii_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
