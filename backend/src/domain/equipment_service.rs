//! Equipment record management.
//!
//! Front door of the record store: the add form appends one validated
//! record, the editable grid replaces the whole table.

use log::{info, warn};
use shared::{
    AddEquipmentRequest, AddEquipmentResponse, EquipmentListResponse, EquipmentRecord,
    SaveEquipmentRequest, SaveEquipmentResponse,
};
use std::sync::Arc;

use crate::domain::dates::{STORAGE_DATE_FORMAT, STORAGE_TIME_FORMAT};
use crate::storage::{Connection, EquipmentStorage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum EquipmentError {
    #[error("Equipment name cannot be empty")]
    MissingName,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Service for managing the equipment table
#[derive(Clone)]
pub struct EquipmentService<C: Connection> {
    repository: Arc<C::EquipmentRepository>,
}

impl<C: Connection> EquipmentService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            repository: Arc::new(connection.create_equipment_repository()),
        }
    }

    /// Every stored record, in table order
    pub fn load_records(&self) -> Result<Vec<EquipmentRecord>, EquipmentError> {
        Ok(self.repository.load()?)
    }

    pub fn list_equipment(&self) -> Result<EquipmentListResponse, EquipmentError> {
        let equipment = self.load_records()?;
        info!("Found {} equipment records", equipment.len());
        Ok(EquipmentListResponse { equipment })
    }

    /// Validate and append a record coming from the add form
    pub fn add_equipment(
        &self,
        request: AddEquipmentRequest,
    ) -> Result<AddEquipmentResponse, EquipmentError> {
        let name = request.name.trim();
        if name.is_empty() {
            warn!("⚠️ Rejected equipment without a name");
            return Err(EquipmentError::MissingName);
        }

        let record = EquipmentRecord {
            kind: request.kind.trim().to_string(),
            department: request.department.trim().to_string(),
            branch: request.branch.trim().to_string(),
            owner: request.owner.trim().to_string(),
            position: request.position.trim().to_string(),
            name: name.to_string(),
            email: request.email.trim().to_string(),
            maintenance_date: request
                .maintenance_date
                .map(|date| date.format(STORAGE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            maintenance_time: request
                .maintenance_time
                .map(|time| time.format(STORAGE_TIME_FORMAT).to_string())
                .unwrap_or_default(),
        };

        self.repository.append(record.clone())?;
        info!("✅ Equipment {} added", record.name);

        Ok(AddEquipmentResponse {
            success_message: format!("Equipo {} agregado correctamente", record.name),
            equipment: record,
        })
    }

    /// Replace the whole table with the edited collection
    pub fn replace_equipment(
        &self,
        request: SaveEquipmentRequest,
    ) -> Result<SaveEquipmentResponse, EquipmentError> {
        self.repository.save(&request.equipment)?;
        info!("✅ Equipment table replaced with {} records", request.equipment.len());

        Ok(SaveEquipmentResponse {
            saved_count: request.equipment.len(),
            success_message: "Cambios guardados correctamente".to_string(),
        })
    }
}
