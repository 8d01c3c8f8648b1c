//! External reputation signal

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::{CheckRequest, CheckResult, SignalCheck};
use crate::reputation::Reputation;

/// Queries an external ban-reputation service for the sender. Failures and
/// timeouts degrade to a non-spam result annotated with the error, keeping
/// the moderation path available when the service is unhealthy. The lookup
/// runs without holding any engine lock.
pub struct ReputationCheck {
    client: Arc<dyn Reputation>,
    timeout: Duration,
}

impl ReputationCheck {
    pub fn new(client: Arc<dyn Reputation>, timeout: Duration) -> Self {
        ReputationCheck { client, timeout }
    }
}

#[async_trait]
impl SignalCheck for ReputationCheck {
    fn name(&self) -> &'static str {
        "reputation"
    }

    async fn evaluate(&self, req: &CheckRequest<'_>) -> CheckResult {
        let verdict = tokio::time::timeout(self.timeout, self.client.is_known_bad(req.sender_id));
        let (spam, details) = match verdict.await {
            Ok(Ok(true)) => (
                true,
                format!("sender {} is known to the reputation service", req.sender_id),
            ),
            Ok(Ok(false)) => (
                false,
                "sender not known to the reputation service".to_string(),
            ),
            Ok(Err(e)) => {
                warn!("reputation lookup for {} failed: {:#}", req.sender_id, e);
                (false, format!("reputation lookup failed: {:#}", e))
            }
            Err(_) => {
                warn!(
                    "reputation lookup for {} timed out after {:?}",
                    req.sender_id, self.timeout
                );
                (
                    false,
                    format!("reputation lookup timed out after {:?}", self.timeout),
                )
            }
        };

        CheckResult {
            name: self.name().to_string(),
            spam,
            details,
        }
    }
}
