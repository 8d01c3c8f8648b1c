use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{DetectorError, Result};

/// Detection engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Corpus similarity score at or above which a message is spam (0.0..=1.0)
    pub similarity_threshold: f64,
    /// Messages shorter than this many characters are exempt from all checks
    pub min_msg_len: usize,
    /// Max pictographic characters allowed in a message
    pub max_emoji: usize,
    /// Deadline for one reputation service lookup
    pub lookup_timeout: Duration,
    /// Report spam without recommending punitive action
    pub dry_run: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            similarity_threshold: 0.5,
            min_msg_len: 100,
            max_emoji: 5,
            lookup_timeout: Duration::from_secs(5), // reputation services are best-effort
            dry_run: false,
        }
    }
}

impl DetectorConfig {
    /// Validate construction-time limits. Called by the engine constructor
    /// so bad limits fail at startup, never mid-classification.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(DetectorError::Config(format!(
                "similarity threshold {} outside 0.0..=1.0",
                self.similarity_threshold
            )));
        }
        if self.lookup_timeout.is_zero() {
            return Err(DetectorError::Config(
                "lookup timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
