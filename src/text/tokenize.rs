//! Message normalization and token filtering

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

/// Shortest token kept after normalization; anything smaller carries no signal.
const MIN_TOKEN_LEN: usize = 3;
/// Longest token kept; longer runs are usually URLs or key-mashing.
const MAX_TOKEN_LEN: usize = 24;

/// Text normalizer shared by the sample store and the checkers
pub struct Tokenizer {
    stemmer: Stemmer,
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Normalize text into stemmed tokens: lowercase, split on
    /// non-alphanumeric boundaries, keep length-bounded words. Pure and
    /// deterministic; adversarial input yields an empty vector, never an
    /// error.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.len() >= MIN_TOKEN_LEN && s.len() <= MAX_TOKEN_LEN)
            .map(|s| self.stemmer.stem(s).to_string())
            .collect()
    }

    /// Normalized token set with tokens from `excluded` removed.
    pub fn token_set(&self, text: &str, excluded: &HashSet<String>) -> HashSet<String> {
        self.normalize(text)
            .into_iter()
            .filter(|t| !excluded.contains(t))
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
