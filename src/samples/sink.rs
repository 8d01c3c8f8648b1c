//! Sample persistence sinks

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

/// Durable backing store for one sample class. Implementations are typically
/// append-only logs, so deletion goes through a full rewrite.
#[cfg_attr(test, automock)]
pub trait SampleSink: Send + Sync {
    /// Durably record one new sample.
    fn append(&self, text: &str) -> io::Result<()>;

    /// Full current corpus for this class, one sample per line.
    fn reader(&self) -> io::Result<Box<dyn Read + Send>>;

    /// Replace the whole corpus with the given samples.
    fn rewrite(&self, texts: &[String]) -> io::Result<()>;
}

/// Append-only log file sink. A missing file reads as an empty corpus so a
/// fresh deployment starts without any setup step.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileSink { path: path.into() }
    }
}

impl SampleSink for FileSink {
    fn append(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", text)
    }

    fn reader(&self) -> io::Result<Box<dyn Read + Send>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Box::new(io::empty())),
            Err(e) => Err(e),
        }
    }

    fn rewrite(&self, texts: &[String]) -> io::Result<()> {
        let mut content = texts.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        std::fs::write(&self.path, content)
    }
}
