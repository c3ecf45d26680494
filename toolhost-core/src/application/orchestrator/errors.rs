use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message content must not be empty")]
    EmptyContent,
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
}
