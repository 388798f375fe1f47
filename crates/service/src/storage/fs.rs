use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::storage::blob::{BlobError, BlobStore};

/// Filesystem-backed blob store: each key is a file under `root`.
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open a store rooted at `root`, creating the directory if missing.
    pub async fn new<P: Into<PathBuf>>(root: P) -> Result<Self, BlobError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, BlobError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BlobError::Io(e)),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), BlobError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.ok();
        }
        fs::write(path, bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn missing_key_is_none_not_error() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("fs_blob_{}", Uuid::new_v4()));
        let store = FsBlobStore::new(&dir).await?;
        assert!(store.fetch("absent.json").await?.is_none());
        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn put_then_fetch_round_trips() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("fs_blob_{}", Uuid::new_v4()));
        let store = FsBlobStore::new(&dir).await?;

        store.put("books.json", b"[]".to_vec()).await?;
        let bytes = store.fetch("books.json").await?.expect("blob exists");
        assert_eq!(bytes, b"[]");

        // overwrite is full-replace
        store.put("books.json", b"[1]".to_vec()).await?;
        let bytes = store.fetch("books.json").await?.expect("blob exists");
        assert_eq!(bytes, b"[1]");

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
