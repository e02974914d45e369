use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
