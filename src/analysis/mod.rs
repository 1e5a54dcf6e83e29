//! Text analysis pipeline shared by training and inference.
//!
//! The analysis chain is deliberately small: raw text passes through a
//! sequence of char filters (alphabetic-only, then lowercase) and the result
//! is tokenized on whitespace. Training and inference must run text through
//! the exact same chain, otherwise the feature space learned at fit time no
//! longer matches what the classifier sees at prediction time.

pub mod char_filter;
pub mod normalizer;
pub mod tokenizer;

pub use char_filter::{AlphabeticFilter, CharFilter, LowercaseCharFilter};
pub use normalizer::TextNormalizer;
pub use tokenizer::{Tokenizer, WhitespaceTokenizer};
