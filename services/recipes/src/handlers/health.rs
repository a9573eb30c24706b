use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Readiness probe for `GET /readyz`: the database must answer a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
