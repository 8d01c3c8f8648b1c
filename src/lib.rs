//! spamguard-rs: multi-signal chat spam detection engine
//!
//! A shared moderation core for chat services: a chat-event listener and an
//! HTTP control API both delegate every classification and list-mutation
//! decision to one [`Detector`].
//!
//! # Features
//!
//! - **Multi-signal classification**: stop words, pictograph flooding,
//!   similarity against a learnable spam corpus, external ban reputation
//! - **Learns from feedback**: spam/ham samples appended at runtime and
//!   durably recorded through caller-supplied sinks
//! - **Allow-list**: trusted senders bypass every check
//! - **Concurrency**: per-collection reader/writer locks; checks run fully
//!   in parallel and never block on unrelated mutations
//!
//! # Example
//!
//! ```no_run
//! use spamguard_rs::config::DetectorConfig;
//! use spamguard_rs::detector::Detector;
//! use spamguard_rs::samples::FileSink;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let detector = Detector::new(
//!         DetectorConfig::default(),
//!         Box::new(FileSink::new("spam-dynamic.txt")),
//!         Box::new(FileSink::new("ham-dynamic.txt")),
//!         None,
//!     )?;
//!
//!     let (spam, results) = detector.check("message text", "sender-id").await;
//!     for r in &results {
//!         println!("{}: spam={} ({})", r.name, r.spam, r.details);
//!     }
//!     println!("verdict: {}", spam);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`detector`]: the detection engine and management surface
//! - [`checks`]: individual signal checkers
//! - [`samples`]: sample corpus, sink abstraction, file sink
//! - [`allowlist`]: trusted-sender registry
//! - [`reputation`]: external ban-reputation collaborator
//! - [`text`]: normalization and similarity utilities
//! - [`config`]: engine configuration
//! - [`error`]: error types and handling

pub mod allowlist;
pub mod checks;
pub mod config;
pub mod detector;
pub mod error;
pub mod reputation;
pub mod samples;
pub mod text;

// Re-export commonly used types
pub use checks::CheckResult;
pub use config::DetectorConfig;
pub use detector::Detector;
pub use error::{DetectorError, Result};
pub use reputation::{HttpReputation, Reputation};
pub use samples::{FileSink, LoadResult, SampleSink};
