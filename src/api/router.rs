use axum::{
    Router,
    routing::{get, patch},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_book, create_loan, delete_book, find_books, find_loans, get_book,
    get_loans_by_book, return_loan, update_book,
};

/// Creates the API router with catalog and lending endpoints
///
/// Catalog:
/// - POST /api/books, GET /api/books
/// - GET/PUT/DELETE /api/books/:id
/// - GET /api/books/:id/loans
///
/// Lending:
/// - POST /api/loans, GET /api/loans
/// - PATCH /api/loans/:id
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/api/books", get(find_books).post(create_book))
        .route(
            "/api/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/books/:id/loans", get(get_loans_by_book))
        .route("/api/loans", get(find_loans).post(create_loan))
        .route("/api/loans/:id", patch(return_loan))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
