use log::{error, info};
use shared::EquipmentRecord;
use std::fs;

use super::connection::XlsxConnection;
use super::workbook::{read_equipment_table, write_equipment_table};
use crate::storage::traits::EquipmentStorage;
use crate::storage::StorageError;

/// Spreadsheet-based equipment repository
#[derive(Clone, Debug)]
pub struct EquipmentRepository {
    connection: XlsxConnection,
}

impl EquipmentRepository {
    pub fn new(connection: XlsxConnection) -> Self {
        Self { connection }
    }
}

impl EquipmentStorage for EquipmentRepository {
    fn load(&self) -> Result<Vec<EquipmentRecord>, StorageError> {
        if self.connection.ensure_table_exists()? {
            return Ok(Vec::new());
        }

        let path = self.connection.data_file();
        let records = read_equipment_table(path).map_err(|e| {
            error!("❌ Failed to load equipment table {}: {}", path.display(), e);
            e
        })?;

        info!("📋 Loaded {} equipment records from {}", records.len(), path.display());
        Ok(records)
    }

    fn save(&self, records: &[EquipmentRecord]) -> Result<(), StorageError> {
        let path = self.connection.data_file();
        let staging = self.connection.staging_file();

        // Write everything to the staging file first, then swap it in
        if let Err(e) = write_equipment_table(&staging, records) {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }
        if let Err(e) = fs::rename(&staging, path) {
            error!("❌ Failed to replace equipment table {}: {}", path.display(), e);
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        info!("💾 Saved {} equipment records to {}", records.len(), path.display());
        Ok(())
    }
}
