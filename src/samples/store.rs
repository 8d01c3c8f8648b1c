//! In-memory sample corpus with durable sink backing

use std::collections::HashSet;
use std::io::{self, BufRead, BufReader, Read};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{DetectorError, Result};
use crate::text::{similarity, Tokenizer};

use super::sink::SampleSink;
use super::types::{LoadResult, Sample, SampleClass};

/// Holder of spam/ham example messages and the excluded-token set.
///
/// Bulk loads stage the full new state before swapping it in, so a failed
/// load leaves the previous corpus intact. Appends write the sink before
/// memory, so a rejected write leaves memory observably unchanged. No lock
/// is held across any sink call.
pub struct SampleStore {
    tokenizer: Tokenizer,
    spam_sink: Box<dyn SampleSink>,
    ham_sink: Box<dyn SampleSink>,
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    excluded: HashSet<String>,
    spam: Vec<Sample>,
    ham: Vec<Sample>,
}

impl Inner {
    fn class(&self, class: SampleClass) -> &Vec<Sample> {
        match class {
            SampleClass::Spam => &self.spam,
            SampleClass::Ham => &self.ham,
        }
    }

    fn class_mut(&mut self, class: SampleClass) -> &mut Vec<Sample> {
        match class {
            SampleClass::Spam => &mut self.spam,
            SampleClass::Ham => &mut self.ham,
        }
    }
}

impl SampleStore {
    pub fn new(spam_sink: Box<dyn SampleSink>, ham_sink: Box<dyn SampleSink>) -> Self {
        SampleStore {
            tokenizer: Tokenizer::new(),
            spam_sink,
            ham_sink,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Replace both collections and the excluded-token set from the given
    /// byte streams, one sample per line. All-or-nothing: a read fault on
    /// any stream aborts the load with prior state untouched.
    pub async fn load(
        &self,
        excl_reader: Box<dyn Read + Send>,
        spam_readers: Vec<Box<dyn Read + Send>>,
        ham_readers: Vec<Box<dyn Read + Send>>,
    ) -> Result<LoadResult> {
        let excluded: HashSet<String> = read_lines(excl_reader)
            .map_err(DetectorError::Load)?
            .iter()
            .flat_map(|line| self.tokenizer.normalize(line))
            .collect();

        let spam = self.read_samples(spam_readers, &excluded)?;
        let ham = self.read_samples(ham_readers, &excluded)?;

        let result = LoadResult {
            excluded_tokens: excluded.len(),
            spam_samples: spam.len(),
            ham_samples: ham.len(),
            stop_words: 0,
        };

        let mut inner = self.inner.write().await;
        inner.excluded = excluded;
        inner.spam = spam;
        inner.ham = ham;
        drop(inner);

        info!(
            "loaded samples: {} spam, {} ham, {} excluded tokens",
            result.spam_samples, result.ham_samples, result.excluded_tokens
        );
        Ok(result)
    }

    /// Re-read both sinks to pick up out-of-process edits. The excluded-token
    /// set is preserved from the last `load`.
    pub async fn reload(&self) -> Result<LoadResult> {
        let excluded = self.inner.read().await.excluded.clone();

        let spam_reader = self.spam_sink.reader().map_err(DetectorError::Load)?;
        let ham_reader = self.ham_sink.reader().map_err(DetectorError::Load)?;
        let spam = self.read_samples(vec![spam_reader], &excluded)?;
        let ham = self.read_samples(vec![ham_reader], &excluded)?;

        let result = LoadResult {
            excluded_tokens: excluded.len(),
            spam_samples: spam.len(),
            ham_samples: ham.len(),
            stop_words: 0,
        };

        let mut inner = self.inner.write().await;
        inner.excluded = excluded;
        inner.spam = spam;
        inner.ham = ham;
        drop(inner);

        info!(
            "reloaded samples: {} spam, {} ham",
            result.spam_samples, result.ham_samples
        );
        Ok(result)
    }

    /// Append one sample to a class, sink first. Re-appending a text already
    /// present in the class is a silent no-op, in memory and at the sink.
    /// Embedded newlines are collapsed so the line-oriented sink round-trips.
    pub async fn append(&self, class: SampleClass, text: &str) -> Result<()> {
        let text = text.replace(['\r', '\n'], " ").trim().to_string();
        if text.is_empty() {
            return Ok(());
        }

        {
            let inner = self.inner.read().await;
            if inner.class(class).iter().any(|s| s.raw == text) {
                debug!("{} sample already present, skipping append", class);
                return Ok(());
            }
        }

        self.sink(class)
            .append(&text)
            .map_err(DetectorError::Persist)?;

        let mut inner = self.inner.write().await;
        // a concurrent append may have landed the same text in the window
        // between the duplicate probe and this point
        if inner.class(class).iter().any(|s| s.raw == text) {
            return Ok(());
        }
        let tokens = self.tokenizer.token_set(&text, &inner.excluded);
        inner.class_mut(class).push(Sample { raw: text, tokens });
        Ok(())
    }

    /// Remove all samples whose raw text equals `text` (exact match) from a
    /// class, rewriting the backing sink with the survivors. Zero matches
    /// return `Ok(0)` without touching the sink.
    pub async fn remove(&self, class: SampleClass, text: &str) -> Result<usize> {
        let survivors: Vec<String> = {
            let inner = self.inner.read().await;
            let collection = inner.class(class);
            if !collection.iter().any(|s| s.raw == text) {
                return Ok(0);
            }
            collection
                .iter()
                .filter(|s| s.raw != text)
                .map(|s| s.raw.clone())
                .collect()
        };

        self.sink(class)
            .rewrite(&survivors)
            .map_err(DetectorError::Persist)?;

        let mut inner = self.inner.write().await;
        let collection = inner.class_mut(class);
        let before = collection.len();
        collection.retain(|s| s.raw != text);
        let removed = before - collection.len();
        drop(inner);

        info!("removed {} {} sample(s)", removed, class);
        Ok(removed)
    }

    /// Raw texts of both collections in store order.
    pub async fn enumerate(&self) -> (Vec<String>, Vec<String>) {
        let inner = self.inner.read().await;
        let spam = inner.spam.iter().map(|s| s.raw.clone()).collect();
        let ham = inner.ham.iter().map(|s| s.raw.clone()).collect();
        (spam, ham)
    }

    /// Normalized token set of a message with excluded tokens removed.
    pub async fn message_tokens(&self, text: &str) -> HashSet<String> {
        let inner = self.inner.read().await;
        self.tokenizer.token_set(text, &inner.excluded)
    }

    /// Highest similarity between `tokens` and any spam sample.
    pub async fn max_spam_similarity(&self, tokens: &HashSet<String>) -> f64 {
        let inner = self.inner.read().await;
        inner
            .spam
            .iter()
            .map(|s| similarity(tokens, &s.tokens))
            .fold(0.0, f64::max)
    }

    fn sink(&self, class: SampleClass) -> &dyn SampleSink {
        match class {
            SampleClass::Spam => self.spam_sink.as_ref(),
            SampleClass::Ham => self.ham_sink.as_ref(),
        }
    }

    /// Read and tokenize samples from a list of byte streams, collapsing
    /// duplicate lines while preserving first-seen order.
    fn read_samples(
        &self,
        readers: Vec<Box<dyn Read + Send>>,
        excluded: &HashSet<String>,
    ) -> Result<Vec<Sample>> {
        let mut seen = HashSet::new();
        let mut samples = Vec::new();
        for reader in readers {
            for line in read_lines(reader).map_err(DetectorError::Load)? {
                if !seen.insert(line.clone()) {
                    continue;
                }
                let tokens = self.tokenizer.token_set(&line, excluded);
                samples.push(Sample { raw: line, tokens });
            }
        }
        Ok(samples)
    }
}

/// Non-blank trimmed lines of a byte stream.
pub(crate) fn read_lines(reader: Box<dyn Read + Send>) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        lines.push(trimmed.to_string());
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::super::sink::MockSampleSink;
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    /// Stateful in-memory sink double. Clones share the same backing lines
    /// so a test can keep a handle for assertions.
    #[derive(Clone, Default)]
    struct MemorySink {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl MemorySink {
        fn new() -> Self {
            MemorySink::default()
        }

        fn contents(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl SampleSink for MemorySink {
        fn append(&self, text: &str) -> io::Result<()> {
            self.lines.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn reader(&self) -> io::Result<Box<dyn Read + Send>> {
            let mut content = self.lines.lock().unwrap().join("\n");
            content.push('\n');
            Ok(Box::new(Cursor::new(content)))
        }

        fn rewrite(&self, texts: &[String]) -> io::Result<()> {
            *self.lines.lock().unwrap() = texts.to_vec();
            Ok(())
        }
    }

    /// Sink whose writes always fail.
    struct RejectingSink;

    impl SampleSink for RejectingSink {
        fn append(&self, _text: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }

        fn reader(&self) -> io::Result<Box<dyn Read + Send>> {
            Ok(Box::new(io::empty()))
        }

        fn rewrite(&self, _texts: &[String]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    /// Reader that yields some bytes, then an I/O fault.
    struct FailingReader {
        fired: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.fired {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream died"));
            }
            self.fired = true;
            let data = b"partial sample line\n";
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }
    }

    fn reader(content: &str) -> Box<dyn Read + Send> {
        Box::new(Cursor::new(content.to_string()))
    }

    fn memory_store() -> SampleStore {
        SampleStore::new(Box::new(MemorySink::new()), Box::new(MemorySink::new()))
    }

    #[tokio::test]
    async fn test_load_counts_and_order() {
        let store = memory_store();
        let result = store
            .load(
                reader(""),
                vec![reader("spam one\nspam two\n\nspam three\n")],
                vec![reader("ham one\n")],
            )
            .await
            .unwrap();

        assert_eq!(result.spam_samples, 3);
        assert_eq!(result.ham_samples, 1);
        assert_eq!(result.excluded_tokens, 0);

        let (spam, ham) = store.enumerate().await;
        assert_eq!(spam, vec!["spam one", "spam two", "spam three"]);
        assert_eq!(ham, vec!["ham one"]);
    }

    #[tokio::test]
    async fn test_load_collapses_duplicate_lines() {
        let store = memory_store();
        let result = store
            .load(
                reader(""),
                vec![reader("same line\nsame line\nother line\n")],
                vec![],
            )
            .await
            .unwrap();

        assert_eq!(result.spam_samples, 2);
    }

    #[tokio::test]
    async fn test_load_replaces_previous_contents() {
        let store = memory_store();
        store
            .load(reader(""), vec![reader("old spam\n")], vec![])
            .await
            .unwrap();
        store
            .load(reader(""), vec![reader("new spam\n")], vec![])
            .await
            .unwrap();

        let (spam, _) = store.enumerate().await;
        assert_eq!(spam, vec!["new spam"]);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_prior_state() {
        let store = memory_store();
        store
            .load(reader(""), vec![reader("good spam sample\n")], vec![])
            .await
            .unwrap();

        let err = store
            .load(
                reader(""),
                vec![Box::new(FailingReader { fired: false })],
                vec![],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DetectorError::Load(_)));

        let (spam, _) = store.enumerate().await;
        assert_eq!(spam, vec!["good spam sample"]);
    }

    #[tokio::test]
    async fn test_excluded_tokens_dropped_from_sample_tokens() {
        let store = memory_store();
        store
            .load(
                reader("common\n"),
                vec![reader("common spam words\n")],
                vec![],
            )
            .await
            .unwrap();

        let tokens = store.message_tokens("common spam").await;
        assert!(tokens.contains("spam"));
        assert!(!tokens.contains("common"));
    }

    #[tokio::test]
    async fn test_append_and_enumerate() {
        let store = memory_store();
        store.append(SampleClass::Spam, "buy cheap watches").await.unwrap();
        store.append(SampleClass::Ham, "see you tomorrow").await.unwrap();

        let (spam, ham) = store.enumerate().await;
        assert_eq!(spam, vec!["buy cheap watches"]);
        assert_eq!(ham, vec!["see you tomorrow"]);
    }

    #[tokio::test]
    async fn test_append_duplicate_is_noop() {
        let store = memory_store();
        store.append(SampleClass::Spam, "buy cheap watches").await.unwrap();
        store.append(SampleClass::Spam, "buy cheap watches").await.unwrap();

        let (spam, _) = store.enumerate().await;
        assert_eq!(spam.len(), 1);
    }

    #[tokio::test]
    async fn test_append_duplicate_skips_sink_write() {
        let mut spam_sink = MockSampleSink::new();
        spam_sink
            .expect_append()
            .times(1)
            .returning(|_| Ok(()));
        let store = SampleStore::new(Box::new(spam_sink), Box::new(MemorySink::new()));

        store.append(SampleClass::Spam, "once only").await.unwrap();
        store.append(SampleClass::Spam, "once only").await.unwrap();
    }

    #[tokio::test]
    async fn test_append_collapses_newlines() {
        let store = memory_store();
        store
            .append(SampleClass::Spam, "line one\nline two")
            .await
            .unwrap();

        let (spam, _) = store.enumerate().await;
        assert_eq!(spam, vec!["line one line two"]);
    }

    #[tokio::test]
    async fn test_append_rejected_by_sink_rolls_back() {
        let store = SampleStore::new(Box::new(RejectingSink), Box::new(MemorySink::new()));

        let err = store
            .append(SampleClass::Spam, "doomed sample")
            .await
            .unwrap_err();
        assert!(matches!(err, DetectorError::Persist(_)));

        let (spam, _) = store.enumerate().await;
        assert!(spam.is_empty());
    }

    #[tokio::test]
    async fn test_remove_rewrites_sink() {
        let spam_sink = MemorySink::new();
        let store = SampleStore::new(Box::new(spam_sink.clone()), Box::new(MemorySink::new()));

        store.append(SampleClass::Spam, "keep this").await.unwrap();
        store.append(SampleClass::Spam, "drop this").await.unwrap();

        let removed = store.remove(SampleClass::Spam, "drop this").await.unwrap();
        assert_eq!(removed, 1);

        let (spam, _) = store.enumerate().await;
        assert_eq!(spam, vec!["keep this"]);

        // the backing sink reflects the surviving collection
        assert_eq!(spam_sink.contents(), vec!["keep this"]);
    }

    #[tokio::test]
    async fn test_remove_absent_text_returns_zero_without_rewrite() {
        let mut spam_sink = MockSampleSink::new();
        spam_sink.expect_append().returning(|_| Ok(()));
        spam_sink.expect_rewrite().times(0);
        let store = SampleStore::new(Box::new(spam_sink), Box::new(MemorySink::new()));

        store.append(SampleClass::Spam, "present").await.unwrap();
        let removed = store.remove(SampleClass::Spam, "absent").await.unwrap();
        assert_eq!(removed, 0);

        let (spam, _) = store.enumerate().await;
        assert_eq!(spam, vec!["present"]);
    }

    #[tokio::test]
    async fn test_reload_reads_sinks() {
        let store = memory_store();
        store.append(SampleClass::Spam, "spam from sink").await.unwrap();
        store.append(SampleClass::Ham, "ham from sink").await.unwrap();

        // wipe memory through a load from empty readers, then reload
        store.load(reader(""), vec![], vec![]).await.unwrap();
        let (spam, _) = store.enumerate().await;
        assert!(spam.is_empty());

        let result = store.reload().await.unwrap();
        assert_eq!(result.spam_samples, 1);
        assert_eq!(result.ham_samples, 1);

        let (spam, ham) = store.enumerate().await;
        assert_eq!(spam, vec!["spam from sink"]);
        assert_eq!(ham, vec!["ham from sink"]);
    }

    #[tokio::test]
    async fn test_max_spam_similarity() {
        let store = memory_store();
        store
            .load(
                reader(""),
                vec![reader("buy cheap watches now\n")],
                vec![],
            )
            .await
            .unwrap();

        let tokens = store.message_tokens("buy cheap watches").await;
        let score = store.max_spam_similarity(&tokens).await;
        assert!(score >= 0.5, "expected high overlap, got {}", score);

        let tokens = store.message_tokens("hello friend").await;
        assert_eq!(store.max_spam_similarity(&tokens).await, 0.0);
    }
}
