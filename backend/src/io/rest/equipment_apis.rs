//! # REST API for Equipment Records
//!
//! Backs the add form (`POST`) and the editable table (`GET` + `PUT`).

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::{AddEquipmentRequest, SaveEquipmentRequest};

use super::equipment_error_response;
use crate::AppState;

/// Create a router for equipment related APIs
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_equipment).post(add_equipment).put(save_equipment),
    )
}

/// Every stored record, in table order
async fn list_equipment(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/equipment");

    match state.equipment_service.list_equipment() {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => equipment_error_response(e),
    }
}

async fn add_equipment(
    State(state): State<AppState>,
    Json(request): Json<AddEquipmentRequest>,
) -> impl IntoResponse {
    info!("POST /api/equipment - name: {:?}", request.name);

    match state.equipment_service.add_equipment(request) {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => equipment_error_response(e),
    }
}

/// Replace the whole table with the edited grid
async fn save_equipment(
    State(state): State<AppState>,
    Json(request): Json<SaveEquipmentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/equipment - {} records", request.equipment.len());

    match state.equipment_service.replace_equipment(request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => equipment_error_response(e),
    }
}
