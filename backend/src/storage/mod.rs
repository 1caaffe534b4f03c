//! # Storage Module
//!
//! Persistence of the equipment table.
//!
//! The domain layer only sees the [`EquipmentStorage`] trait and the
//! [`Connection`] factory; the concrete backend is a single `.xlsx` workbook
//! (see [`xlsx`]). The table is always written as a whole: there is no
//! incremental update, no locking and the last writer wins.

pub mod traits;
pub mod xlsx;

pub use traits::*;
pub use xlsx::{EquipmentRepository, XlsxConnection};

use std::path::{Path, PathBuf};

/// Errors raised by the storage layer
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing table exists but cannot be understood; never retried
    #[error("Backing table {} is corrupt: {reason}", .path.display())]
    DataCorruption { path: PathBuf, reason: String },
    #[error("I/O error on backing table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write backing table: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

impl StorageError {
    pub fn corruption(path: &Path, reason: impl Into<String>) -> Self {
        StorageError::DataCorruption {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
