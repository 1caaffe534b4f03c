//! Spreadsheet-backed storage: one worksheet, one header row, one record per row.

pub mod connection;
pub mod equipment_repository;
pub mod workbook;

#[cfg(test)]
pub mod test_utils;

pub use connection::XlsxConnection;
pub use equipment_repository::EquipmentRepository;
