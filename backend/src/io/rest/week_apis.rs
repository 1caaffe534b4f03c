use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::WeekListResponse;

use super::report_error_response;
use crate::AppState;

/// Create a router for the week picker
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_weeks))
}

/// Weeks with scheduled maintenance, oldest first
async fn list_weeks(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/weeks");

    match state.report_service.list_buckets() {
        Ok(weeks) => (StatusCode::OK, Json(WeekListResponse { weeks })).into_response(),
        Err(e) => report_error_response(e),
    }
}
