use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("failed to load samples: {0}")]
    Load(std::io::Error),

    #[error("failed to persist sample: {0}")]
    Persist(std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
