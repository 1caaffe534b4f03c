//! Report rendering.
//!
//! A [`TabularView`] can be rendered as an XLSX workbook or as a PDF
//! document. Both renderers take the view as-is: columns, order and cell
//! text are decided by the table formatter upstream.

pub mod pdf;
pub mod spreadsheet;

use rust_xlsxwriter::XlsxError;

use crate::domain::models::TabularView;

pub use pdf::PdfRenderError;
pub use spreadsheet::REPORT_SHEET_NAME;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Spreadsheet rendering failed: {0}")]
    Spreadsheet(#[from] XlsxError),
    #[error(transparent)]
    Pdf(#[from] PdfRenderError),
}

/// Renders tabular views into downloadable documents
#[derive(Clone, Debug, Default)]
pub struct ReportExporter;

impl ReportExporter {
    pub fn new() -> Self {
        Self
    }

    /// XLSX bytes: one sheet, header row then one row per record
    pub fn to_spreadsheet(&self, view: &TabularView) -> Result<Vec<u8>, ReportError> {
        Ok(spreadsheet::render_spreadsheet(view)?)
    }

    /// PDF bytes with a title, an optional subtitle and the table
    pub fn to_pdf(
        &self,
        view: &TabularView,
        title: &str,
        subtitle: Option<&str>,
    ) -> Result<Vec<u8>, ReportError> {
        Ok(pdf::render_pdf(view, title, subtitle)?)
    }
}
