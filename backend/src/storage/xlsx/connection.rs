use log::info;
use std::path::{Path, PathBuf};

use super::equipment_repository::EquipmentRepository;
use super::workbook::write_equipment_table;
use crate::storage::traits::Connection;
use crate::storage::StorageError;

/// XlsxConnection owns the location of the backing table and creates it on first use
#[derive(Clone, Debug)]
pub struct XlsxConnection {
    data_file: PathBuf,
}

impl XlsxConnection {
    /// Create a connection for the workbook at `data_file` (not touched until first use)
    pub fn new<P: AsRef<Path>>(data_file: P) -> Self {
        Self {
            data_file: data_file.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing table
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Temporary sibling used for atomic replacement of the backing table
    pub fn staging_file(&self) -> PathBuf {
        let mut staging = self.data_file.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    /// Ensure the backing table exists, creating an empty one with the header row.
    ///
    /// Returns true when the table had to be created.
    pub fn ensure_table_exists(&self) -> Result<bool, StorageError> {
        if self.data_file.exists() {
            return Ok(false);
        }

        write_equipment_table(&self.data_file, &[])?;
        info!("📄 Created empty equipment table at {}", self.data_file.display());
        Ok(true)
    }
}

impl Connection for XlsxConnection {
    type EquipmentRepository = EquipmentRepository;

    fn create_equipment_repository(&self) -> Self::EquipmentRepository {
        EquipmentRepository::new(self.clone())
    }
}
