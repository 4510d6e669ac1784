pub mod apartment;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health              service and database status (GET)
/// /apartments          list (GET), create (POST)
/// /apartments/{id}     get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health::router())
        .nest("/apartments", apartment::router())
}
