pub mod books;
pub mod meta;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::books::BookStore;

/// Shared handler state: the one store instance for the process,
/// constructed at startup and injected into every handler.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<BookStore>,
}

/// Build the full application router: greeting routes, book CRUD, docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let meta = Router::new()
        .route("/", get(meta::root))
        .route("/hello-world", get(meta::hello_world));

    let books = Router::new()
        .route("/books", get(books::list_books))
        .route("/random-book", get(books::random_book))
        .route("/books-by-index/:index", get(books::book_by_index))
        .route("/book-by-id", get(books::book_by_id))
        .route("/add-book", post(books::add_book))
        .route("/update-book/:book_id", post(books::update_book))
        .route("/delete-book", delete(books::delete_book));

    let docs =
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi());

    meta.merge(books)
        .merge(docs)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
