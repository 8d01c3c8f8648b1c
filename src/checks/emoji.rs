//! Excessive-pictograph signal

use async_trait::async_trait;

use super::{CheckRequest, CheckResult, SignalCheck};
use crate::text::count_emoji;

/// Flags messages with more pictographic characters than allowed.
pub struct EmojiCheck {
    max_emoji: usize,
}

impl EmojiCheck {
    pub fn new(max_emoji: usize) -> Self {
        EmojiCheck { max_emoji }
    }
}

#[async_trait]
impl SignalCheck for EmojiCheck {
    fn name(&self) -> &'static str {
        "emoji"
    }

    async fn evaluate(&self, req: &CheckRequest<'_>) -> CheckResult {
        let count = count_emoji(req.text);
        CheckResult {
            name: self.name().to_string(),
            spam: count > self.max_emoji,
            details: format!("{} emoji found, max {}", count, self.max_emoji),
        }
    }
}
