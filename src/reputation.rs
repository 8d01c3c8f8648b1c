//! External ban-reputation lookup
//!
//! Best-effort collaborator: the engine treats any failure here as a
//! neutral signal, so implementations are free to just bubble errors up.

use anyhow::{Context, Result};
use serde::Deserialize;

#[cfg(test)]
use mockall::automock;

/// Ban-reputation source keyed by sender identifier
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Reputation: Send + Sync {
    /// Whether the sender is already known-bad to the reputation source.
    async fn is_known_bad(&self, sender_id: &str) -> Result<bool>;
}

/// Client for CAS-style reputation HTTP services.
///
/// The service contract is `GET {base}/check?user_id={id}` answering
/// `{"ok": bool, "description": "..."}`, where `ok == true` means the
/// sender is listed as banned.
pub struct HttpReputation {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ReputationResponse {
    ok: bool,
    #[serde(default)]
    #[allow(dead_code)]
    description: String,
}

impl HttpReputation {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpReputation {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Reputation for HttpReputation {
    async fn is_known_bad(&self, sender_id: &str) -> Result<bool> {
        let url = format!("{}/check?user_id={}", self.base_url, sender_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("reputation request to {} failed", self.base_url))?;

        let body: ReputationResponse = resp
            .json()
            .await
            .context("malformed reputation response")?;
        Ok(body.ok)
    }
}
