use shared::WeekKey;

/// Column names plus string cells aligned to them, shared by both report renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Kind of rendered report document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Spreadsheet,
    Pdf,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Spreadsheet => "xlsx",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ReportFormat::Pdf => "application/pdf",
        }
    }

    /// Suggested file name: per-week when a week is selected, fixed default otherwise
    pub fn file_name(&self, week: Option<WeekKey>) -> String {
        match week {
            Some(key) => format!(
                "mantenimiento_{}_semana_{}.{}",
                key.year,
                key.week,
                self.extension()
            ),
            None => format!("mantenimiento_preventivo.{}", self.extension()),
        }
    }
}

/// A rendered document, held only for the duration of one request
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub format: ReportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Spreadsheet and PDF rendering of the same set of records
#[derive(Debug, Clone, PartialEq)]
pub struct WeekExport {
    /// None when every record was exported rather than a single week
    pub week: Option<WeekKey>,
    /// Bucket label, used as the PDF subtitle
    pub label: Option<String>,
    pub row_count: usize,
    pub spreadsheet: ExportArtifact,
    pub pdf: ExportArtifact,
}

/// Outcome of an export request
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Exported(WeekExport),
    /// No record carries a usable maintenance date
    NothingToExport,
}
