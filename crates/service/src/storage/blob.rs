use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Key/value object storage holding opaque named blobs.
///
/// `fetch` distinguishes "key does not exist" (`Ok(None)`) from backend
/// failure; a missing key is a normal condition for a store that has never
/// persisted anything. `put` overwrites the blob in full.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, BlobError>;
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), BlobError>;
}
