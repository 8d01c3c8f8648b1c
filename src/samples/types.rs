//! Sample corpus types

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sample class labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleClass {
    Spam,
    Ham,
}

impl std::fmt::Display for SampleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleClass::Spam => write!(f, "spam"),
            SampleClass::Ham => write!(f, "ham"),
        }
    }
}

/// A labeled example message. The token set is recomputed from the raw text
/// on every load, never diffed.
#[derive(Debug, Clone)]
pub struct Sample {
    pub raw: String,
    pub tokens: HashSet<String>,
}

/// Counts reported by bulk load operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadResult {
    pub excluded_tokens: usize,
    pub spam_samples: usize,
    pub ham_samples: usize,
    pub stop_words: usize,
}
