#![deny(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DedupError {
    #[error("invalid {dataset} schema: {message}")]
    InvalidSchema { dataset: String, message: String },
}

pub type Result<T> = std::result::Result<T, DedupError>;
