//! Liveness plus database reachability, mounted at `/api/health`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    /// `up` or `down`.
    pub database: &'static str,
    pub version: &'static str,
}

/// 200 when the database answers `SELECT 1`, 503 when it does not. The body
/// has the same shape either way.
async fn report(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let (code, status, database) = match nawy_db::health_check(&state.pool).await {
        Ok(()) => (StatusCode::OK, "ok", "up"),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        }
    };

    (
        code,
        Json(HealthStatus {
            status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(report))
}
