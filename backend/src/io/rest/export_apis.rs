//! # REST API for Report Export
//!
//! Downloads return the document bytes with a suggested file name; the
//! `POST` variants write both documents into the configured export
//! directory instead. A store without anything to export answers
//! `204 No Content` to downloads.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use log::info;
use shared::WeekKey;

use super::report_error_response;
use crate::domain::models::{ExportArtifact, ExportOutcome, ReportFormat};
use crate::AppState;

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/weeks/:year/:week", post(export_week_to_directory))
        .route("/weeks/:year/:week/xlsx", get(download_week_spreadsheet))
        .route("/weeks/:year/:week/pdf", get(download_week_pdf))
        .route("/all", post(export_all_to_directory))
        .route("/all/xlsx", get(download_all_spreadsheet))
        .route("/all/pdf", get(download_all_pdf))
}

fn attachment(artifact: ExportArtifact) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response()
}

fn download(outcome: ExportOutcome, format: ReportFormat) -> Response {
    match outcome {
        ExportOutcome::Exported(export) => {
            let artifact = match format {
                ReportFormat::Spreadsheet => export.spreadsheet,
                ReportFormat::Pdf => export.pdf,
            };
            info!("✅ Sending {} ({} bytes)", artifact.file_name, artifact.bytes.len());
            attachment(artifact)
        }
        ExportOutcome::NothingToExport => StatusCode::NO_CONTENT.into_response(),
    }
}

fn download_week(state: &AppState, year: i32, week: u32, format: ReportFormat) -> Response {
    match state.report_service.export(WeekKey::new(year, week)) {
        Ok(outcome) => download(outcome, format),
        Err(e) => report_error_response(e),
    }
}

fn download_all(state: &AppState, format: ReportFormat) -> Response {
    match state.report_service.export_all() {
        Ok(outcome) => download(outcome, format),
        Err(e) => report_error_response(e),
    }
}

async fn download_week_spreadsheet(
    State(state): State<AppState>,
    Path((year, week)): Path<(i32, u32)>,
) -> impl IntoResponse {
    info!("GET /api/export/weeks/{}/{}/xlsx", year, week);
    download_week(&state, year, week, ReportFormat::Spreadsheet)
}

async fn download_week_pdf(
    State(state): State<AppState>,
    Path((year, week)): Path<(i32, u32)>,
) -> impl IntoResponse {
    info!("GET /api/export/weeks/{}/{}/pdf", year, week);
    download_week(&state, year, week, ReportFormat::Pdf)
}

async fn download_all_spreadsheet(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/export/all/xlsx");
    download_all(&state, ReportFormat::Spreadsheet)
}

async fn download_all_pdf(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/export/all/pdf");
    download_all(&state, ReportFormat::Pdf)
}

/// Write the week's spreadsheet and PDF into the export directory
async fn export_week_to_directory(
    State(state): State<AppState>,
    Path((year, week)): Path<(i32, u32)>,
) -> impl IntoResponse {
    info!("POST /api/export/weeks/{}/{}", year, week);

    match state
        .report_service
        .export_to_directory(Some(WeekKey::new(year, week)))
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => report_error_response(e),
    }
}

async fn export_all_to_directory(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/export/all");

    match state.report_service.export_to_directory(None) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => report_error_response(e),
    }
}
