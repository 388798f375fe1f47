use thiserror::Error;

use crate::storage::blob::BlobError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Book ID {0} not found in database.")]
    NotFound(String),
    #[error("book index {index} out of range ({len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no books in the store")]
    Empty,
    #[error("storage error: {0}")]
    Storage(#[from] BlobError),
    #[error("malformed book data: {0}")]
    Serde(#[from] serde_json::Error),
}
