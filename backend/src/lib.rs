//! # Maintenance Tracker Backend
//!
//! Keeps the preventive-maintenance schedule of an office's computers and
//! produces weekly reports from it.
//!
//! ## Architecture
//!
//! ```text
//! UI (any HTTP client)
//!     ↓
//! IO Layer (REST API, axum handlers)
//!     ↓
//! Domain Layer (record management, weekly grouping, report rendering)
//!     ↓
//! Storage Layer (.xlsx backing table)
//! ```
//!
//! Every domain operation is synchronous; the HTTP layer calls the services
//! directly from its handlers.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::domain::{EquipmentService, ReportService};
use crate::storage::XlsxConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub equipment_service: EquipmentService<XlsxConnection>,
    pub report_service: ReportService<XlsxConnection>,
    /// Origin allowed to call the API from a browser
    pub frontend_origin: HeaderValue,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up backing table at {:?}", config.data_file);
    let connection = XlsxConnection::new(config.data_file.clone());
    if connection.ensure_table_exists()? {
        info!("📁 Created empty backing table {:?}", config.data_file);
    }

    let frontend_origin = config
        .frontend_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid frontend origin '{}'", config.frontend_origin))?;

    info!("Setting up domain services");
    let equipment_service = EquipmentService::new(&connection);
    let report_service = ReportService::new(&connection, config);

    Ok(AppState {
        equipment_service,
        report_service,
        frontend_origin,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.frontend_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/equipment", io::rest::equipment_apis::router())
        .nest("/weeks", io::rest::week_apis::router())
        .nest("/export", io::rest::export_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
