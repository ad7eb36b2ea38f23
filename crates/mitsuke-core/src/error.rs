use thiserror::Error;

#[derive(Debug, Error)]
pub enum MitsukeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid threshold {0}: expected a value between 0.0 and 1.0")]
    InvalidThreshold(f64),
}
