//! Corpus-similarity signal

use async_trait::async_trait;
use std::sync::Arc;

use super::{CheckRequest, CheckResult, SignalCheck};
use crate::samples::SampleStore;

/// Flags messages whose token overlap with any known spam sample reaches
/// the configured threshold. The boundary is inclusive: a score exactly at
/// the threshold counts as spam.
pub struct SimilarityCheck {
    samples: Arc<SampleStore>,
    threshold: f64,
}

impl SimilarityCheck {
    pub fn new(samples: Arc<SampleStore>, threshold: f64) -> Self {
        SimilarityCheck { samples, threshold }
    }
}

#[async_trait]
impl SignalCheck for SimilarityCheck {
    fn name(&self) -> &'static str {
        "similarity"
    }

    async fn evaluate(&self, req: &CheckRequest<'_>) -> CheckResult {
        let score = self.samples.max_spam_similarity(&req.tokens).await;
        CheckResult {
            name: self.name().to_string(),
            spam: score >= self.threshold,
            details: format!("similarity {:.2}, threshold {:.2}", score, self.threshold),
        }
    }
}
