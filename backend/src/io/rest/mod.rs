//! # REST API Interface Layer
//!
//! HTTP endpoints of the maintenance tracker, one module per resource:
//!
//! - **equipment_apis**: `/api/equipment` list, add and full save
//! - **week_apis**: `/api/weeks` selectable weeks
//! - **export_apis**: `/api/export/...` report downloads and exports to disk
//!
//! Handlers only translate; every rule lives in the domain layer.

pub mod equipment_apis;
pub mod export_apis;
pub mod week_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, warn};

use crate::domain::{EquipmentError, ReportServiceError};
use crate::storage::StorageError;

fn storage_error_response(e: &StorageError) -> Response {
    error!("❌ Storage failure: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}

/// Map an equipment error to its HTTP response
pub fn equipment_error_response(e: EquipmentError) -> Response {
    match e {
        EquipmentError::MissingName => {
            warn!("⚠️ Rejected request: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        EquipmentError::Storage(ref storage) => storage_error_response(storage),
    }
}

/// Map a report error to its HTTP response
pub fn report_error_response(e: ReportServiceError) -> Response {
    match e {
        ReportServiceError::WeekNotFound(_) => {
            warn!("⚠️ {}", e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        ReportServiceError::Storage(ref storage) => storage_error_response(storage),
        ReportServiceError::Report(_) | ReportServiceError::Io { .. } => {
            error!("❌ Failed to export report: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{body::Body, http::Request, response::Response, Router};
    use shared::EquipmentRecord;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::storage::xlsx::test_utils::TestEnvironment;
    use crate::storage::{Connection, EquipmentStorage};
    use crate::{create_router, initialize_backend};

    /// Router over a temporary backing table seeded with `records`
    pub fn test_app(records: &[EquipmentRecord]) -> (Router, TestEnvironment, AppConfig) {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        env.connection
            .create_equipment_repository()
            .save(records)
            .expect("Failed to seed records");

        let config = AppConfig {
            data_file: env.data_file().to_path_buf(),
            export_dir: env.base_path.join("exports"),
            ..AppConfig::default()
        };
        let state = initialize_backend(&config).expect("Failed to initialize backend");

        (create_router(state), env, config)
    }

    pub async fn send(app: Router, request: Request<Body>) -> (Response, Vec<u8>) {
        let response = app.oneshot(request).await.expect("Request failed");
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Failed to read body");
        (Response::from_parts(parts, Body::empty()), bytes.to_vec())
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn json(method: &str, uri: &str, body: &impl serde::Serialize) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }
}
