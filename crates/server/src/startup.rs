use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::books::BookStore;
use service::storage::blob::BlobStore;
use service::storage::fs::FsBlobStore;

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks.
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Storage location from configs or env vars, with sensible fallbacks.
fn load_storage_location() -> (String, String) {
    match configs::load_default() {
        Ok(cfg) => (cfg.storage.data_dir, cfg.storage.books_key),
        Err(_) => {
            let data_dir = env::var("BOOKS_DATA_DIR").unwrap_or_else(|_| "data".to_string());
            let books_key = env::var("BOOKS_KEY").unwrap_or_else(|_| "books.json".to_string());
            (data_dir, books_key)
        }
    }
}

/// Public entry: hydrate the store, build the app, run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let (data_dir, books_key) = load_storage_location();
    common::env::ensure_data_dir(&data_dir).await?;

    // The one store instance for the process; handlers receive it via state.
    let blob: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(&data_dir).await?);
    let store = BookStore::open(blob, books_key).await?;

    let state = ServerState { store };
    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr()?;
    info!(%addr, "starting bookstore server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
