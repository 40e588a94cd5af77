//! Error types for spread analytics

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpreadError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request to {url} failed with status {status}")]
    Request { url: String, status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Missing quote data: {0}")]
    MissingQuote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type SpreadResult<T> = Result<T, SpreadError>;

impl SpreadError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn missing_quote(msg: impl Into<String>) -> Self {
        Self::MissingQuote(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}
