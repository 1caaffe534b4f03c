//! Reading and writing the equipment worksheet.
//!
//! Reading is tolerant: header names are canonicalized, column order is
//! free, blank rows are skipped and native spreadsheet dates are converted to
//! the canonical text form. Writing always produces the canonical header in
//! the canonical column order with every value stored as text.

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use log::{debug, warn};
use rust_xlsxwriter::{Format, Workbook};
use shared::EquipmentRecord;
use std::fs;
use std::path::Path;

use crate::domain::dates::{STORAGE_DATE_FORMAT, STORAGE_TIME_FORMAT};
use crate::domain::models::EquipmentColumn;
use crate::storage::StorageError;

/// Name of the worksheet written to the backing table
pub const EQUIPMENT_SHEET_NAME: &str = "Equipos";

/// Null markers left behind by tools that exported empty cells as text
const NULL_MARKERS: &[&str] = &["nan", "NaN", "NaT", "None"];

/// Largest Excel serial date (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Read every record of the first worksheet of `path`
pub fn read_equipment_table(path: &Path) -> Result<Vec<EquipmentRecord>, StorageError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| StorageError::corruption(path, format!("cannot open workbook: {e}")))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => {
            return Err(StorageError::corruption(
                path,
                format!("cannot read first worksheet: {e}"),
            ))
        }
        None => return Err(StorageError::corruption(path, "workbook has no worksheet")),
    };

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| StorageError::corruption(path, "missing header row"))?;
    let layout = resolve_header(path, header)?;

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            debug!("Skipping blank row {} in {}", index + 2, path.display());
            continue;
        }

        let mut record = EquipmentRecord::default();
        for (position, column) in layout.iter().enumerate() {
            if let Some(column) = column {
                let cell = row.get(position).unwrap_or(&Data::Empty);
                column.set(&mut record, cell_text(cell, *column));
            }
        }
        records.push(record);
    }

    Ok(records)
}

/// Write `records` as a fresh workbook at `path`, replacing any existing file
pub fn write_equipment_table(path: &Path, records: &[EquipmentRecord]) -> Result<(), StorageError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EQUIPMENT_SHEET_NAME)?;

    for (col, column) in EquipmentColumn::ALL.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column.display_name(), &header_format)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, column) in EquipmentColumn::ALL.iter().enumerate() {
            let value = column.value(record);
            if !value.is_empty() {
                worksheet.write_string(row, col as u16, value)?;
            }
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Map each header cell to a known column, requiring all of them to be present
fn resolve_header(
    path: &Path,
    header: &[Data],
) -> Result<Vec<Option<EquipmentColumn>>, StorageError> {
    let mut layout = Vec::with_capacity(header.len());

    for cell in header {
        let title = match cell {
            Data::String(s) => s.as_str(),
            _ => "",
        };

        let column = EquipmentColumn::from_header(title);
        match column {
            Some(column) if layout.contains(&Some(column)) => {
                warn!("⚠️ Duplicate column '{}' in {}, keeping the first", title, path.display());
                layout.push(None);
            }
            Some(column) => layout.push(Some(column)),
            None => {
                if !title.trim().is_empty() {
                    warn!("⚠️ Ignoring unknown column '{}' in {}", title, path.display());
                }
                layout.push(None);
            }
        }
    }

    let missing: Vec<&str> = EquipmentColumn::ALL
        .iter()
        .filter(|column| !layout.contains(&Some(**column)))
        .map(|column| column.display_name())
        .collect();

    if !missing.is_empty() {
        return Err(StorageError::corruption(
            path,
            format!("missing columns: {}", missing.join(", ")),
        ));
    }

    Ok(layout)
}

/// Render a cell as the text stored on the record
fn cell_text(cell: &Data, column: EquipmentColumn) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => {
            let value = s.trim();
            if NULL_MARKERS.contains(&value) {
                String::new()
            } else {
                value.to_string()
            }
        }
        Data::Float(v) => number_text(*v, column),
        Data::Int(v) => number_text(*v as f64, column),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => match column {
                EquipmentColumn::MaintenanceDate => {
                    datetime.date().format(STORAGE_DATE_FORMAT).to_string()
                }
                EquipmentColumn::MaintenanceTime => {
                    datetime.time().format(STORAGE_TIME_FORMAT).to_string()
                }
                _ => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            },
            None => String::new(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        _ => String::new(),
    }
}

fn number_text(value: f64, column: EquipmentColumn) -> String {
    let converted = match column {
        EquipmentColumn::MaintenanceDate => {
            excel_serial_to_date(value).map(|date| date.format(STORAGE_DATE_FORMAT).to_string())
        }
        EquipmentColumn::MaintenanceTime => {
            excel_fraction_to_time(value).map(|time| time.format(STORAGE_TIME_FORMAT).to_string())
        }
        _ => None,
    };

    converted.unwrap_or_else(|| {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            format!("{value}")
        }
    })
}

/// Excel serial day number (1900 date system) to a calendar date
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(TimeDelta::try_days(serial.floor() as i64)?)
}

/// Fraction of a day to a time of day
fn excel_fraction_to_time(value: f64) -> Option<NaiveTime> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let seconds = (value.fract() * 86_400.0).round() as u32 % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_records() -> Vec<EquipmentRecord> {
        vec![
            EquipmentRecord {
                kind: "Laptop".to_string(),
                department: "Contabilidad".to_string(),
                branch: "Centro".to_string(),
                owner: "Ana Pérez".to_string(),
                position: "Contadora".to_string(),
                name: "PC-1".to_string(),
                email: "ana@example.com".to_string(),
                maintenance_date: "2025-10-20".to_string(),
                maintenance_time: "14:30:00".to_string(),
            },
            EquipmentRecord::named("PC-2").with_maintenance_date("not a date"),
        ]
    }

    #[test]
    fn test_write_then_read_preserves_records_and_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("equipos.xlsx");

        write_equipment_table(&path, &sample_records()).unwrap();
        let loaded = read_equipment_table(&path).unwrap();

        assert_eq!(loaded, sample_records());
    }

    #[test]
    fn test_header_only_table_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("equipos.xlsx");

        write_equipment_table(&path, &[]).unwrap();

        assert!(read_equipment_table(&path).unwrap().is_empty());
    }

    #[test]
    fn test_reads_reordered_accented_headers_and_native_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let headers = [
            "Nombre de Equipo",
            "Posición",
            "Tipo",
            "Departamento",
            "Sucursal",
            "Responsable",
            "Correo",
            "Fecha de Mantenimiento",
            "Hora",
            "Semana",
        ];
        for (col, title) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *title).unwrap();
        }
        sheet.write_string(1, 0, "PC-7").unwrap();
        sheet.write_string(1, 1, "nan").unwrap();
        sheet.write_number(1, 2, 42.0).unwrap();
        // 45950 is 2025-10-20 in the 1900 date system
        sheet.write_number(1, 7, 45950.0).unwrap();
        sheet.write_number(1, 8, 0.5).unwrap();
        sheet.write_number(1, 9, 43.0).unwrap();
        workbook.save(&path).unwrap();

        let loaded = read_equipment_table(&path).unwrap();

        assert_eq!(loaded.len(), 1);
        let record = &loaded[0];
        assert_eq!(record.name, "PC-7");
        assert_eq!(record.position, "");
        assert_eq!(record.kind, "42");
        assert_eq!(record.maintenance_date, "2025-10-20");
        assert_eq!(record.maintenance_time, "12:00:00");
    }

    #[test]
    fn test_missing_column_is_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Nombre de Equipo").unwrap();
        sheet.write_string(0, 1, "Tipo").unwrap();
        workbook.save(&path).unwrap();

        match read_equipment_table(&path) {
            Err(StorageError::DataCorruption { reason, .. }) => {
                assert!(reason.contains("Fecha de Mantenimiento"));
            }
            other => panic!("expected corruption, got {other:?}"),
        }
    }

    #[test]
    fn test_non_spreadsheet_file_is_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("equipos.xlsx");
        fs::write(&path, b"definitely not a zip archive").unwrap();

        assert!(matches!(
            read_equipment_table(&path),
            Err(StorageError::DataCorruption { .. })
        ));
    }

    #[test]
    fn test_excel_serial_conversions() {
        assert_eq!(excel_serial_to_date(45950.0), NaiveDate::from_ymd_opt(2025, 10, 20));
        assert_eq!(excel_serial_to_date(45950.75), NaiveDate::from_ymd_opt(2025, 10, 20));
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_fraction_to_time(0.75), NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(excel_fraction_to_time(-1.0), None);
    }
}
