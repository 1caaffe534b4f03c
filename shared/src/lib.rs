use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One tracked computer and its preventive maintenance slot.
///
/// Every field is text; an empty string means "no value". The maintenance
/// date and time keep the raw text of the backing table so that values the
/// backend cannot parse survive a load/save cycle untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentRecord {
    /// Equipment type (desktop, laptop, printer...)
    pub kind: String,
    pub department: String,
    pub branch: String,
    /// Person responsible for the equipment
    pub owner: String,
    pub position: String,
    /// Equipment identifier, required when added through the form
    pub name: String,
    pub email: String,
    /// Scheduled maintenance date as stored (canonical form: YYYY-MM-DD)
    pub maintenance_date: String,
    /// Scheduled maintenance time as stored (canonical form: HH:MM:SS)
    pub maintenance_time: String,
}

impl EquipmentRecord {
    /// Create a record that only carries an identifier
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_maintenance_date(mut self, date: impl Into<String>) -> Self {
        self.maintenance_date = date.into();
        self
    }

    pub fn with_maintenance_time(mut self, time: impl Into<String>) -> Self {
        self.maintenance_time = time.into();
        self
    }
}

/// ISO-8601 week identifier: week-numbering year plus week number (1-53).
///
/// Field order matters: the derived `Ord` sorts by year first, then week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// A selectable week as presented to the UI week picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub label: String,
    pub key: WeekKey,
    pub record_count: usize,
    /// Earliest maintenance date among the week's records
    pub first_date: NaiveDate,
    /// Latest maintenance date among the week's records
    pub last_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekListResponse {
    /// Weeks ordered by (year, week) ascending
    pub weeks: Vec<WeekSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentListResponse {
    pub equipment: Vec<EquipmentRecord>,
}

/// Input of the "add equipment" form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddEquipmentRequest {
    pub kind: String,
    pub department: String,
    pub branch: String,
    pub owner: String,
    pub position: String,
    pub name: String,
    pub email: String,
    pub maintenance_date: Option<NaiveDate>,
    pub maintenance_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddEquipmentResponse {
    pub equipment: EquipmentRecord,
    pub success_message: String,
}

/// Full replacement of the equipment table, as produced by the editable grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEquipmentRequest {
    pub equipment: Vec<EquipmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEquipmentResponse {
    pub saved_count: usize,
    pub success_message: String,
}

/// Result of writing a weekly report pair into the export directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToDirectoryResponse {
    /// False when there was nothing to export
    pub exported: bool,
    pub message: String,
    pub spreadsheet_path: Option<String>,
    pub pdf_path: Option<String>,
    pub row_count: usize,
}
