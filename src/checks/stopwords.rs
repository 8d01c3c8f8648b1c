//! Stop-word signal

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{CheckRequest, CheckResult, SignalCheck};

/// Flags messages containing any token from the stop-word set.
pub struct StopWordCheck {
    stop_words: Arc<RwLock<HashSet<String>>>,
}

impl StopWordCheck {
    pub fn new(stop_words: Arc<RwLock<HashSet<String>>>) -> Self {
        StopWordCheck { stop_words }
    }
}

#[async_trait]
impl SignalCheck for StopWordCheck {
    fn name(&self) -> &'static str {
        "stopword"
    }

    async fn evaluate(&self, req: &CheckRequest<'_>) -> CheckResult {
        let stop_words = self.stop_words.read().await;
        match req.tokens.iter().find(|t| stop_words.contains(*t)) {
            Some(token) => CheckResult {
                name: self.name().to_string(),
                spam: true,
                details: format!("stop word {:?} found", token),
            },
            None => CheckResult {
                name: self.name().to_string(),
                spam: false,
                details: "no stop words found".to_string(),
            },
        }
    }
}
