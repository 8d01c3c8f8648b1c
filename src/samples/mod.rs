//! Labeled sample corpus
//!
//! In-memory spam/ham example messages with precomputed token sets, backed
//! by caller-supplied append-only sinks for durability.

pub mod sink;
pub mod store;
pub mod types;

pub use sink::{FileSink, SampleSink};
pub use store::SampleStore;
pub use types::{LoadResult, Sample, SampleClass};
