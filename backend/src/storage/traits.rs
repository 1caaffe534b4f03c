//! # Storage Traits
//!
//! Storage abstraction used by the domain layer, so the backing table format
//! can change without touching business logic.

use shared::EquipmentRecord;

use super::StorageError;

/// Interface of the equipment record store
pub trait EquipmentStorage: Send + Sync {
    /// Load every record in stored order.
    ///
    /// A missing backing table is created empty; a malformed one fails with
    /// [`StorageError::DataCorruption`].
    fn load(&self) -> Result<Vec<EquipmentRecord>, StorageError>;

    /// Replace the whole table with `records`, preserving their order
    fn save(&self, records: &[EquipmentRecord]) -> Result<(), StorageError>;

    /// Add one record at the end of the table
    fn append(&self, record: EquipmentRecord) -> Result<(), StorageError> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)
    }
}

/// Factory for repositories bound to one storage location
pub trait Connection: Send + Sync + Clone {
    /// The type of EquipmentStorage this connection creates
    type EquipmentRepository: EquipmentStorage;

    fn create_equipment_repository(&self) -> Self::EquipmentRepository;
}
