//! Signal checkers
//!
//! Independent spam-evidence evaluators. Each checker contributes exactly
//! one [`CheckResult`] per message; the engine runs them in registration
//! order and ORs the verdicts, so callers always get the full evidence set.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod emoji;
pub mod reputation;
pub mod similarity;
pub mod stopwords;

pub use emoji::EmojiCheck;
pub use reputation::ReputationCheck;
pub use similarity::SimilarityCheck;
pub use stopwords::StopWordCheck;

/// Verdict of one signal checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Checker name, stable across runs
    pub name: String,
    /// Whether this signal considers the message spam
    pub spam: bool,
    /// Human-readable explanation of the verdict
    pub details: String,
}

/// One message as seen by the checkers
pub struct CheckRequest<'a> {
    pub text: &'a str,
    pub sender_id: &'a str,
    /// Normalized tokens with excluded tokens already removed
    pub tokens: HashSet<String>,
}

/// One spam-evidence evaluator. Implementations hold shared handles to the
/// collections they read and take their own short read locks; a checker
/// must degrade to a non-spam result on internal failure, never panic or
/// error out of the chain.
#[async_trait]
pub trait SignalCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn evaluate(&self, req: &CheckRequest<'_>) -> CheckResult;
}
