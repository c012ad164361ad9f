//! HTTP layer for the mini-apis server.

pub mod error;
pub mod quotemaster;

use axum::{http::StatusCode, routing::any, Router};
use mini_apis_core::QuoteRepository;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
///
/// The mutex only serializes requests within this process. Another process
/// writing the same data directory (e.g. the admin CLI) is not coordinated
/// with, and whichever writes last wins.
#[derive(Clone)]
pub struct AppState {
    quotes: Arc<Mutex<QuoteRepository>>,
}

impl AppState {
    pub fn new(quotes: QuoteRepository) -> Self {
        Self {
            quotes: Arc::new(Mutex::new(quotes)),
        }
    }

    /// Locks the quote repository. A panic in another handler doesn't leave
    /// the document half-written on disk, so a poisoned lock is reused.
    fn quotes(&self) -> MutexGuard<'_, QuoteRepository> {
        self.quotes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lets frontends check that the server is up.
async fn handshake() -> StatusCode {
    StatusCode::OK
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/handshake", any(handshake))
        .nest("/quotemaster", quotemaster::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
