use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use service::books::{Book, BookDraft};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BookIdQuery {
    pub book_id: String,
}

#[utoipa::path(
    get, path = "/books", tag = "books",
    responses((status = 200, description = "All books in insertion order"))
)]
pub async fn list_books(State(state): State<ServerState>) -> Json<Vec<Book>> {
    let books = state.store.get_all_books().await;
    info!(count = books.len(), "list books");
    Json(books)
}

#[utoipa::path(
    get, path = "/random-book", tag = "books",
    responses(
        (status = 200, description = "A randomly picked book"),
        (status = 404, description = "The collection is empty")
    )
)]
pub async fn random_book(State(state): State<ServerState>) -> Result<Json<Book>, JsonApiError> {
    let book = state.store.random_book().await?;
    Ok(Json(book))
}

#[utoipa::path(
    get, path = "/books-by-index/{index}", tag = "books",
    params(("index" = usize, Path, description = "Zero-based insertion index")),
    responses(
        (status = 200, description = "The book at the index"),
        (status = 404, description = "Index out of range")
    )
)]
pub async fn book_by_index(
    State(state): State<ServerState>,
    Path(index): Path<usize>,
) -> Result<Json<Book>, JsonApiError> {
    let book = state.store.get_book_by_index(index).await?;
    Ok(Json(book))
}

#[utoipa::path(
    get, path = "/book-by-id", tag = "books",
    params(BookIdQuery),
    responses(
        (status = 200, description = "The book with the given id"),
        (status = 404, description = "Unknown book id")
    )
)]
pub async fn book_by_id(
    State(state): State<ServerState>,
    Query(q): Query<BookIdQuery>,
) -> Result<Json<Book>, JsonApiError> {
    let book = state.store.get_book_by_id(&q.book_id).await?;
    Ok(Json(book))
}

#[utoipa::path(
    post, path = "/add-book", tag = "books",
    request_body = crate::openapi::BookDraftDoc,
    responses(
        (status = 200, description = "Created; body carries the new id"),
        (status = 422, description = "Missing field or unknown genre")
    )
)]
pub async fn add_book(
    State(state): State<ServerState>,
    Json(draft): Json<BookDraft>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    let book_id = state.store.add_book(draft).await?;
    Ok(Json(serde_json::json!({ "book-id": book_id })))
}

#[utoipa::path(
    post, path = "/update-book/{book_id}", tag = "books",
    params(("book_id" = String, Path, description = "Id of the book to replace")),
    request_body = crate::openapi::BookDraftDoc,
    responses(
        (status = 200, description = "Replaced; body carries the book and its id"),
        (status = 404, description = "Unknown book id"),
        (status = 422, description = "Missing field or unknown genre")
    )
)]
pub async fn update_book(
    State(state): State<ServerState>,
    Path(book_id): Path<String>,
    Json(draft): Json<BookDraft>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    let book = state.store.update_book(&book_id, draft).await?;
    Ok(Json(serde_json::json!({ "book": book, "book-id": book_id })))
}

#[utoipa::path(
    delete, path = "/delete-book", tag = "books",
    params(BookIdQuery),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Unknown book id")
    )
)]
pub async fn delete_book(
    State(state): State<ServerState>,
    Query(q): Query<BookIdQuery>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    state.store.delete_book(&q.book_id).await?;
    Ok(Json(serde_json::json!({ "message": "The book has been deleted" })))
}
