use std::sync::Arc;

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::RngCore;
use tokio::sync::RwLock;
use tracing::info;

use crate::books::model::{Book, BookDraft};
use crate::errors::ServiceError;
use crate::storage::blob::BlobStore;

/// Collection of books hydrated from a single JSON blob and flushed back
/// in full after every mutation.
///
/// Insertion order is observable through the index endpoint, so the books
/// live in a `Vec` (the persisted form is an ordered JSON array); id
/// lookup is a linear scan. The write guard is held across both the
/// in-memory mutation and the blob write, so two concurrent mutations on
/// one instance cannot lose updates.
pub struct BookStore {
    blob: Arc<dyn BlobStore>,
    source_key: String,
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    /// Hydrate the store from `source_key`. A missing blob is a fresh
    /// store, not an error; any other fetch or parse failure is fatal.
    /// Persisted ids are kept verbatim, never regenerated.
    pub async fn open(
        blob: Arc<dyn BlobStore>,
        source_key: impl Into<String>,
    ) -> Result<Arc<Self>, ServiceError> {
        let source_key = source_key.into();
        let books = match blob.fetch(&source_key).await? {
            Some(bytes) => {
                let books: Vec<Book> = serde_json::from_slice(&bytes)?;
                info!(key = %source_key, count = books.len(), "loaded book collection");
                books
            }
            None => {
                info!(key = %source_key, "no existing collection, starting empty");
                Vec::new()
            }
        };
        Ok(Arc::new(Self { blob, source_key, books: RwLock::new(books) }))
    }

    /// All books in insertion order.
    pub async fn get_all_books(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn get_book_by_id(&self, book_id: &str) -> Result<Book, ServiceError> {
        let books = self.books.read().await;
        books
            .iter()
            .find(|b| b.book_id == book_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(book_id.to_string()))
    }

    /// The `index`-th book in insertion order; the first book added is
    /// index 0, and deletions shift later books down.
    pub async fn get_book_by_index(&self, index: usize) -> Result<Book, ServiceError> {
        let books = self.books.read().await;
        books
            .get(index)
            .cloned()
            .ok_or(ServiceError::IndexOutOfRange { index, len: books.len() })
    }

    /// A uniformly random book, with an explicit error on an empty
    /// collection.
    pub async fn random_book(&self) -> Result<Book, ServiceError> {
        let books = self.books.read().await;
        books.choose(&mut OsRng).cloned().ok_or(ServiceError::Empty)
    }

    /// Insert `draft` under a freshly generated id (any caller-supplied id
    /// is discarded), persist, and return the new id. Duplicate
    /// name/genre/price content is allowed.
    pub async fn add_book(&self, draft: BookDraft) -> Result<String, ServiceError> {
        let mut books = self.books.write().await;
        let book_id = loop {
            let candidate = new_book_id();
            if !books.iter().any(|b| b.book_id == candidate) {
                break candidate;
            }
        };
        books.push(Book {
            name: draft.name,
            genre: draft.genre,
            price: draft.price,
            book_id: book_id.clone(),
        });
        self.persist(&books).await?;
        info!(%book_id, count = books.len(), "book added");
        Ok(book_id)
    }

    /// Replace the book stored under `book_id` wholesale. The replacement
    /// keeps the lookup id regardless of what the draft carried, so the
    /// collection key and the embedded id cannot diverge.
    pub async fn update_book(&self, book_id: &str, draft: BookDraft) -> Result<Book, ServiceError> {
        let mut books = self.books.write().await;
        let slot = books
            .iter_mut()
            .find(|b| b.book_id == book_id)
            .ok_or_else(|| ServiceError::NotFound(book_id.to_string()))?;
        *slot = Book {
            name: draft.name,
            genre: draft.genre,
            price: draft.price,
            book_id: book_id.to_string(),
        };
        let updated = slot.clone();
        self.persist(&books).await?;
        info!(%book_id, "book updated");
        Ok(updated)
    }

    /// Remove the book stored under `book_id` and persist the shrunk
    /// collection.
    pub async fn delete_book(&self, book_id: &str) -> Result<(), ServiceError> {
        let mut books = self.books.write().await;
        let pos = books
            .iter()
            .position(|b| b.book_id == book_id)
            .ok_or_else(|| ServiceError::NotFound(book_id.to_string()))?;
        books.remove(pos);
        self.persist(&books).await?;
        info!(%book_id, count = books.len(), "book deleted");
        Ok(())
    }

    /// Serialize the whole collection and overwrite the blob. Called with
    /// the write guard held; a failure leaves memory updated and the blob
    /// stale.
    async fn persist(&self, books: &[Book]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(books)?;
        self.blob.put(&self.source_key, data).await?;
        Ok(())
    }
}

/// 20 random bytes, hex-encoded: an opaque 40-character token.
fn new_book_id() -> String {
    let mut buf = [0u8; 20];
    OsRng.fill_bytes(&mut buf);
    buf.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use uuid::Uuid;

    use super::*;
    use crate::books::model::Genre;
    use crate::storage::fs::FsBlobStore;

    async fn temp_store() -> (Arc<BookStore>, PathBuf) {
        let dir = std::env::temp_dir().join(format!("bookstore_test_{}", Uuid::new_v4()));
        let blob: Arc<dyn BlobStore> =
            Arc::new(FsBlobStore::new(&dir).await.expect("blob store opens"));
        let store = BookStore::open(blob, "books.json").await.expect("store opens");
        (store, dir)
    }

    fn draft(name: &str, genre: Genre, price: f64) -> BookDraft {
        BookDraft { name: name.to_string(), genre, price, book_id: None }
    }

    async fn cleanup(dir: &PathBuf) {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }

    #[tokio::test]
    async fn missing_blob_starts_empty() {
        let (store, dir) = temp_store().await;
        assert!(store.get_all_books().await.is_empty());
        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn add_then_get_round_trips() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        let id = store.add_book(draft("Dune", Genre::Fiction, 9.99)).await?;
        assert_eq!(id.len(), 40);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

        let book = store.get_book_by_id(&id).await?;
        assert_eq!(book.name, "Dune");
        assert_eq!(book.genre, Genre::Fiction);
        assert_eq!(book.price, 9.99);
        assert_eq!(book.book_id, id);
        assert_eq!(store.get_all_books().await.len(), 1);

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn caller_supplied_id_is_overwritten() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        let mut d = draft("Emma", Genre::Romance, 4.5);
        d.book_id = Some("chosen-by-caller".into());
        let id = store.add_book(d).await?;
        assert_ne!(id, "chosen-by-caller");
        assert!(store.get_book_by_id("chosen-by-caller").await.is_err());

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_unique_and_content_may_repeat() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        let a = store.add_book(draft("Dune", Genre::Fiction, 9.99)).await?;
        let b = store.add_book(draft("Dune", Genre::Fiction, 9.99)).await?;
        assert_ne!(a, b);
        assert_eq!(store.get_all_books().await.len(), 2);

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn index_follows_insertion_order() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        store.add_book(draft("First", Genre::Drama, 1.0)).await?;
        store.add_book(draft("Second", Genre::Comedy, 2.0)).await?;
        store.add_book(draft("Third", Genre::Adventure, 3.0)).await?;

        assert_eq!(store.get_book_by_index(0).await?.name, "First");
        assert_eq!(store.get_book_by_index(1).await?.name, "Second");
        assert_eq!(store.get_book_by_index(2).await?.name, "Third");

        match store.get_book_by_index(3).await {
            Err(ServiceError::IndexOutOfRange { index: 3, len: 3 }) => {}
            other => panic!("expected out-of-range, got {other:?}"),
        }

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_shifts_later_books_down() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        let first = store.add_book(draft("First", Genre::Drama, 1.0)).await?;
        store.add_book(draft("Second", Genre::Comedy, 2.0)).await?;

        store.delete_book(&first).await?;
        assert_eq!(store.get_all_books().await.len(), 1);
        assert_eq!(store.get_book_by_index(0).await?.name, "Second");
        assert!(store.get_book_by_id(&first).await.is_err());

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_everywhere() {
        let (store, dir) = temp_store().await;

        let missing = "0".repeat(40);
        assert!(matches!(
            store.get_book_by_id(&missing).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            store.update_book(&missing, draft("X", Genre::Drama, 1.0)).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_book(&missing).await,
            Err(ServiceError::NotFound(_))
        ));

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn update_replaces_wholesale_and_realigns_id() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        let id = store.add_book(draft("Dune", Genre::Fiction, 9.99)).await?;

        let mut replacement = draft("Dune Messiah", Genre::Adventure, 12.5);
        replacement.book_id = Some("divergent-id".into());
        let updated = store.update_book(&id, replacement).await?;

        assert_eq!(updated.name, "Dune Messiah");
        assert_eq!(updated.genre, Genre::Adventure);
        assert_eq!(updated.book_id, id);

        let fetched = store.get_book_by_id(&id).await?;
        assert_eq!(fetched, updated);
        assert_eq!(store.get_all_books().await.len(), 1);

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn random_book_errors_on_empty_then_picks_from_collection() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;

        assert!(matches!(store.random_book().await, Err(ServiceError::Empty)));

        let id = store.add_book(draft("Only", Genre::SelfImprovement, 7.0)).await?;
        assert_eq!(store.random_book().await?.book_id, id);

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn reload_yields_identical_collection() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("bookstore_test_{}", Uuid::new_v4()));
        let blob: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(&dir).await?);
        let store = BookStore::open(Arc::clone(&blob), "books.json").await?;

        store.add_book(draft("First", Genre::Fiction, 1.0)).await?;
        store.add_book(draft("Second", Genre::Romance, 2.0)).await?;
        let before = store.get_all_books().await;

        let reloaded = BookStore::open(blob, "books.json").await?;
        assert_eq!(reloaded.get_all_books().await, before);

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn persisted_layout_is_a_json_array_of_records() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("bookstore_test_{}", Uuid::new_v4()));
        let blob: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(&dir).await?);
        let store = BookStore::open(Arc::clone(&blob), "books.json").await?;

        let id = store.add_book(draft("Dune", Genre::Fiction, 9.99)).await?;

        let bytes = blob.fetch("books.json").await?.expect("blob written");
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        assert_eq!(
            value,
            serde_json::json!([
                {"name": "Dune", "genre": "fiction", "price": 9.99, "book_id": id}
            ])
        );

        cleanup(&dir).await;
        Ok(())
    }
}
