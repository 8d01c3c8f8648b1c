//! Detection engine
//!
//! Orchestrates the allow-list short-circuit, the minimum-length exemption,
//! and the signal checker chain, and exposes the update/reload/list
//! management surface shared by the event listener and the control API.

use std::collections::HashSet;
use std::io::Read;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::allowlist::AllowList;
use crate::checks::{
    CheckRequest, CheckResult, EmojiCheck, ReputationCheck, SignalCheck, SimilarityCheck,
    StopWordCheck,
};
use crate::config::DetectorConfig;
use crate::error::{DetectorError, Result};
use crate::reputation::Reputation;
use crate::samples::store::read_lines;
use crate::samples::{LoadResult, SampleClass, SampleSink, SampleStore};
use crate::text::Tokenizer;

/// Name of the minimum-length exemption result.
const LENGTH_CHECK: &str = "message length";

/// Multi-signal spam detection engine.
///
/// The engine exclusively owns the sample store, the allow-list, and the
/// stop-word set; each is guarded by its own reader/writer lock, so checks
/// proceed fully in parallel and a mutation of one collection never blocks
/// a check that only touches another.
pub struct Detector {
    config: DetectorConfig,
    tokenizer: Tokenizer,
    approved: AllowList,
    samples: Arc<SampleStore>,
    stop_words: Arc<RwLock<HashSet<String>>>,
    checks: Vec<Box<dyn SignalCheck>>,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("config", &self.config)
            .field("checks", &self.checks.len())
            .finish_non_exhaustive()
    }
}

impl Detector {
    /// Create an engine with the given configuration and collaborators.
    /// Fails fast on invalid limits. The reputation checker joins the chain
    /// only when a client is supplied.
    pub fn new(
        config: DetectorConfig,
        spam_sink: Box<dyn SampleSink>,
        ham_sink: Box<dyn SampleSink>,
        reputation: Option<Arc<dyn Reputation>>,
    ) -> Result<Self> {
        config.validate()?;

        let samples = Arc::new(SampleStore::new(spam_sink, ham_sink));
        let stop_words = Arc::new(RwLock::new(HashSet::new()));

        let mut checks: Vec<Box<dyn SignalCheck>> = vec![
            Box::new(StopWordCheck::new(stop_words.clone())),
            Box::new(EmojiCheck::new(config.max_emoji)),
            Box::new(SimilarityCheck::new(
                samples.clone(),
                config.similarity_threshold,
            )),
        ];
        if let Some(client) = reputation {
            checks.push(Box::new(ReputationCheck::new(client, config.lookup_timeout)));
        }

        Ok(Detector {
            config,
            tokenizer: Tokenizer::new(),
            approved: AllowList::new(),
            samples,
            stop_words,
            checks,
        })
    }

    /// Classify one message. Never fails: a degraded signal abstains
    /// instead of aborting the classification.
    ///
    /// Approved senders short-circuit to `(false, [])` without touching any
    /// other state. Messages shorter than the configured minimum yield a
    /// single exemption result and skip the chain entirely.
    pub async fn check(&self, text: &str, sender_id: &str) -> (bool, Vec<CheckResult>) {
        if self.approved.contains(sender_id).await {
            debug!("sender {} is approved, skipping checks", sender_id);
            return (false, Vec::new());
        }

        let length = text.chars().count();
        if length < self.config.min_msg_len {
            return (
                false,
                vec![CheckResult {
                    name: LENGTH_CHECK.to_string(),
                    spam: false,
                    details: format!(
                        "too short to classify: {} of {} chars",
                        length, self.config.min_msg_len
                    ),
                }],
            );
        }

        let req = CheckRequest {
            text,
            sender_id,
            tokens: self.samples.message_tokens(text).await,
        };

        let mut results = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            results.push(check.evaluate(&req).await);
        }

        let spam = results.iter().any(|r| r.spam);
        if spam {
            let signals: Vec<&str> = results
                .iter()
                .filter(|r| r.spam)
                .map(|r| r.name.as_str())
                .collect();
            info!("spam detected from {}, signals: {:?}", sender_id, signals);
        }
        (spam, results)
    }

    // --- allow-list management ---

    pub async fn add_approved_users(&self, ids: &[String]) {
        self.approved.add(ids).await;
    }

    pub async fn remove_approved_users(&self, ids: &[String]) {
        self.approved.remove(ids).await;
    }

    /// Approved sender ids, sorted for deterministic enumeration.
    pub async fn approved_users(&self) -> Vec<String> {
        let mut ids = self.approved.list().await;
        ids.sort();
        ids
    }

    // --- sample and stop-word management ---

    /// Replace the sample corpus and excluded-token set from byte streams.
    /// All-or-nothing: on failure the prior corpus stays intact.
    pub async fn load_samples(
        &self,
        excl_reader: Box<dyn Read + Send>,
        spam_readers: Vec<Box<dyn Read + Send>>,
        ham_readers: Vec<Box<dyn Read + Send>>,
    ) -> Result<LoadResult> {
        self.samples.load(excl_reader, spam_readers, ham_readers).await
    }

    /// Replace the stop-word set from byte streams, one entry per line.
    /// Entries pass through the same normalization as message text.
    pub async fn load_stop_words(
        &self,
        readers: Vec<Box<dyn Read + Send>>,
    ) -> Result<LoadResult> {
        let mut staged = HashSet::new();
        for reader in readers {
            for line in read_lines(reader).map_err(DetectorError::Load)? {
                staged.extend(self.tokenizer.normalize(&line));
            }
        }

        let result = LoadResult {
            stop_words: staged.len(),
            ..LoadResult::default()
        };

        *self.stop_words.write().await = staged;
        info!("loaded {} stop words", result.stop_words);
        Ok(result)
    }

    /// Learn a message as spam.
    pub async fn update_spam(&self, text: &str) -> Result<()> {
        self.samples.append(SampleClass::Spam, text).await
    }

    /// Learn a message as ham.
    pub async fn update_ham(&self, text: &str) -> Result<()> {
        self.samples.append(SampleClass::Ham, text).await
    }

    /// Current spam and ham sample texts, in store order.
    pub async fn dynamic_samples(&self) -> Result<(Vec<String>, Vec<String>)> {
        Ok(self.samples.enumerate().await)
    }

    /// Re-read the backing sample sinks to pick up out-of-process edits.
    pub async fn reload_samples(&self) -> Result<()> {
        self.samples.reload().await.map(|_| ())
    }

    /// Remove a spam sample by exact text; returns the number removed.
    pub async fn remove_dynamic_spam_sample(&self, text: &str) -> Result<usize> {
        self.samples.remove(SampleClass::Spam, text).await
    }

    /// Remove a ham sample by exact text; returns the number removed.
    pub async fn remove_dynamic_ham_sample(&self, text: &str) -> Result<usize> {
        self.samples.remove(SampleClass::Ham, text).await
    }

    // --- policy accessors ---

    /// Whether callers should report spam without punitive action.
    pub fn is_dry(&self) -> bool {
        self.config.dry_run
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}
