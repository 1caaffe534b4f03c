//! # Domain Module
//!
//! Business logic of the maintenance tracker. Works on plain
//! [`shared::EquipmentRecord`] values and the storage traits, independent of
//! the HTTP layer and of the backing file format.
//!
//! ## Module Organization
//!
//! - **equipment_service**: add form and editable-table operations on the record store
//! - **week_bucketer**: ISO-week grouping and bucket labels
//! - **equipment_table**: display formatting of records as a table
//! - **report_exporter**: spreadsheet and PDF rendering of a table
//! - **report_service**: weekly/full export orchestration and delivery to disk
//! - **dates**: tolerant parsing of stored dates and times
//!
//! ## Business Rules
//!
//! - A record needs a non-blank name to be added
//! - Records are grouped by the ISO week-numbering year and week of their maintenance date
//! - A record without a usable date is kept, but never belongs to a week
//! - Edits replace the whole table

pub mod dates;
pub mod equipment_service;
pub mod equipment_table;
pub mod models;
pub mod report_exporter;
pub mod report_service;
pub mod week_bucketer;

pub use dates::*;
pub use equipment_service::*;
pub use equipment_table::*;
pub use report_exporter::{ReportError, ReportExporter};
pub use report_service::*;
pub use week_bucketer::*;
