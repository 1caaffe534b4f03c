//! Equipment table formatting.
//!
//! Turns records into the display-ready [`TabularView`] consumed by both
//! report renderers, so the spreadsheet and the PDF always show the same
//! columns in the same order with identically formatted cells.
//!
//! ## Formatting rules
//!
//! - **Maintenance date**: `DD-Mon-YYYY` (e.g. `05-Oct-2025`)
//! - **Maintenance time**: 12-hour clock with AM/PM (e.g. `02:30 PM`)
//! - **Everything else**: the stored text as-is
//!
//! A date or time that is missing or cannot be parsed becomes an empty
//! cell, never an error marker.

use shared::EquipmentRecord;

use crate::domain::dates::{parse_maintenance_date, parse_maintenance_time};
use crate::domain::models::{EquipmentColumn, TabularView};

/// Display format of maintenance dates in reports
pub const REPORT_DATE_FORMAT: &str = "%d-%b-%Y";

/// Display format of maintenance times in reports
pub const REPORT_TIME_FORMAT: &str = "%I:%M %p";

/// Table formatter shared by every export
#[derive(Clone, Debug, Default)]
pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Column headers, in canonical order
    pub fn columns(&self) -> Vec<String> {
        EquipmentColumn::ALL
            .iter()
            .map(|column| column.display_name().to_string())
            .collect()
    }

    /// Format records for display, one row per record in input order
    pub fn format(&self, records: &[EquipmentRecord]) -> TabularView {
        TabularView {
            columns: self.columns(),
            rows: records.iter().map(|record| self.format_row(record)).collect(),
        }
    }

    /// Format a single record as cells aligned to [`TableFormatter::columns`]
    pub fn format_row(&self, record: &EquipmentRecord) -> Vec<String> {
        EquipmentColumn::ALL
            .iter()
            .map(|column| self.format_cell(*column, record))
            .collect()
    }

    fn format_cell(&self, column: EquipmentColumn, record: &EquipmentRecord) -> String {
        match column {
            EquipmentColumn::MaintenanceDate => self.format_date(&record.maintenance_date),
            EquipmentColumn::MaintenanceTime => self.format_time(&record.maintenance_time),
            other => other.value(record).to_string(),
        }
    }

    pub fn format_date(&self, raw: &str) -> String {
        parse_maintenance_date(raw)
            .map(|date| date.format(REPORT_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    pub fn format_time(&self, raw: &str) -> String {
        parse_maintenance_time(raw)
            .map(|time| time.format(REPORT_TIME_FORMAT).to_string())
            .unwrap_or_default()
    }
}
