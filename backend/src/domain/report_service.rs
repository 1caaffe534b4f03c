//! Weekly maintenance reports.
//!
//! Orchestrates the whole export path: load the records, group them by ISO
//! week, pick the requested bucket, format it as a table and render both
//! documents. Results are returned as bytes for download and can also be
//! written into the configured export directory.

use log::{error, info, warn};
use shared::{EquipmentRecord, ExportToDirectoryResponse, WeekKey, WeekSummary};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::equipment_table::TableFormatter;
use crate::domain::models::{ExportArtifact, ExportOutcome, ReportFormat, WeekBucket, WeekExport};
use crate::domain::report_exporter::{ReportError, ReportExporter};
use crate::domain::week_bucketer::WeekBucketer;
use crate::storage::{Connection, EquipmentStorage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error("No maintenance scheduled for week {0}")]
    WeekNotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Failed to write export {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Service producing weekly and full maintenance reports
#[derive(Clone)]
pub struct ReportService<C: Connection> {
    repository: Arc<C::EquipmentRepository>,
    bucketer: WeekBucketer,
    formatter: TableFormatter,
    exporter: ReportExporter,
    report_title: String,
    export_dir: PathBuf,
}

impl<C: Connection> ReportService<C> {
    pub fn new(connection: &C, config: &AppConfig) -> Self {
        Self {
            repository: Arc::new(connection.create_equipment_repository()),
            bucketer: WeekBucketer::new(),
            formatter: TableFormatter::new(),
            exporter: ReportExporter::new(),
            report_title: config.report_title.clone(),
            export_dir: config.export_dir.clone(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Weeks that have at least one scheduled record, in (year, week) order
    pub fn list_buckets(&self) -> Result<Vec<WeekSummary>, ReportServiceError> {
        let records = self.repository.load()?;
        let weeks = self.bucketer.list(&records);
        info!("📅 Found {} weeks with scheduled maintenance", weeks.len());
        Ok(weeks)
    }

    /// Export the records of one ISO week
    pub fn export(&self, key: WeekKey) -> Result<ExportOutcome, ReportServiceError> {
        info!("📄 EXPORT: Exporting week {}", key);
        let records = self.repository.load()?;
        let selected = self.bucketer.select(&records, key);
        self.export_selected(&records, selected, || key.to_string())
    }

    /// Export the week whose label is exactly `label`
    pub fn export_by_label(&self, label: &str) -> Result<ExportOutcome, ReportServiceError> {
        info!("📄 EXPORT: Exporting week '{}'", label);
        let records = self.repository.load()?;
        let selected = self.bucketer.select_by_label(&records, label);
        self.export_selected(&records, selected, || label.to_string())
    }

    /// A missed selection is only an error when some week could have matched
    fn export_selected(
        &self,
        records: &[EquipmentRecord],
        selected: Option<WeekBucket>,
        requested: impl FnOnce() -> String,
    ) -> Result<ExportOutcome, ReportServiceError> {
        match selected {
            Some(bucket) => {
                let export = self.render(Some(bucket.key), Some(bucket.label), &bucket.records)?;
                Ok(ExportOutcome::Exported(export))
            }
            None if self.bucketer.bucket(records).is_empty() => {
                warn!("⚠️ EXPORT: No record has a usable maintenance date");
                Ok(ExportOutcome::NothingToExport)
            }
            None => {
                let requested = requested();
                warn!("⚠️ EXPORT: Week {} not found", requested);
                Err(ReportServiceError::WeekNotFound(requested))
            }
        }
    }

    /// Export every stored record, dated or not, in store order
    pub fn export_all(&self) -> Result<ExportOutcome, ReportServiceError> {
        info!("📄 EXPORT: Exporting every record");
        let records = self.repository.load()?;

        if records.is_empty() {
            warn!("⚠️ EXPORT: No records to export");
            return Ok(ExportOutcome::NothingToExport);
        }

        let export = self.render(None, None, &records)?;
        Ok(ExportOutcome::Exported(export))
    }

    /// Export one week (or everything) and write both documents into the
    /// export directory
    pub fn export_to_directory(
        &self,
        key: Option<WeekKey>,
    ) -> Result<ExportToDirectoryResponse, ReportServiceError> {
        let outcome = match key {
            Some(key) => self.export(key)?,
            None => self.export_all()?,
        };

        let export = match outcome {
            ExportOutcome::Exported(export) => export,
            ExportOutcome::NothingToExport => {
                return Ok(ExportToDirectoryResponse {
                    exported: false,
                    message: "No hay registros para exportar".to_string(),
                    spreadsheet_path: None,
                    pdf_path: None,
                    row_count: 0,
                });
            }
        };

        fs::create_dir_all(&self.export_dir).map_err(|source| ReportServiceError::Io {
            path: self.export_dir.clone(),
            source,
        })?;

        let spreadsheet_path = self.write_artifact(&export.spreadsheet)?;
        let pdf_path = self.write_artifact(&export.pdf)?;

        info!(
            "✅ EXPORT: Wrote {} rows to {:?} and {:?}",
            export.row_count, spreadsheet_path, pdf_path
        );

        Ok(ExportToDirectoryResponse {
            exported: true,
            message: format!("Reporte exportado en {}", self.export_dir.display()),
            spreadsheet_path: Some(spreadsheet_path.display().to_string()),
            pdf_path: Some(pdf_path.display().to_string()),
            row_count: export.row_count,
        })
    }

    fn write_artifact(&self, artifact: &ExportArtifact) -> Result<PathBuf, ReportServiceError> {
        let path = self.export_dir.join(&artifact.file_name);
        fs::write(&path, &artifact.bytes).map_err(|source| {
            error!("❌ EXPORT: Failed to write {:?}: {}", path, source);
            ReportServiceError::Io {
                path: path.clone(),
                source,
            }
        })?;
        Ok(path)
    }

    fn render(
        &self,
        week: Option<WeekKey>,
        label: Option<String>,
        records: &[EquipmentRecord],
    ) -> Result<WeekExport, ReportServiceError> {
        let view = self.formatter.format(records);

        let spreadsheet = ExportArtifact {
            format: ReportFormat::Spreadsheet,
            file_name: ReportFormat::Spreadsheet.file_name(week),
            bytes: self.exporter.to_spreadsheet(&view)?,
        };
        let pdf = ExportArtifact {
            format: ReportFormat::Pdf,
            file_name: ReportFormat::Pdf.file_name(week),
            bytes: self
                .exporter
                .to_pdf(&view, &self.report_title, label.as_deref())?,
        };

        info!("✅ EXPORT: Rendered {} rows", view.row_count());

        Ok(WeekExport {
            week,
            label,
            row_count: view.row_count(),
            spreadsheet,
            pdf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report_exporter::pdf::page_texts;
    use crate::storage::xlsx::test_utils::TestEnvironment;
    use crate::storage::XlsxConnection;
    use calamine::{open_workbook_from_rs, Reader, Xlsx};
    use std::io::Cursor;

    fn setup(records: &[EquipmentRecord]) -> (ReportService<XlsxConnection>, TestEnvironment) {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        env.connection
            .create_equipment_repository()
            .save(records)
            .expect("Failed to seed records");
        let config = AppConfig {
            data_file: env.data_file().to_path_buf(),
            export_dir: env.base_path.join("exports"),
            ..AppConfig::default()
        };
        (ReportService::new(&env.connection, &config), env)
    }

    fn scenario() -> Vec<EquipmentRecord> {
        vec![
            EquipmentRecord::named("PC-1").with_maintenance_date("2025-10-20"),
            EquipmentRecord::named("PC-2").with_maintenance_date("2025-10-24"),
            EquipmentRecord::named("PC-3").with_maintenance_date("2025-10-29"),
        ]
    }

    fn exported(outcome: ExportOutcome) -> WeekExport {
        match outcome {
            ExportOutcome::Exported(export) => export,
            ExportOutcome::NothingToExport => panic!("Expected an export"),
        }
    }

    /// Name column of every data row in a rendered spreadsheet
    fn spreadsheet_names(bytes: &[u8]) -> Vec<String> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec())).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        range
            .rows()
            .skip(1)
            .map(|row| row[5].to_string())
            .collect()
    }

    #[test]
    fn test_end_to_end_week_export() {
        let (service, _env) = setup(&scenario());

        let weeks = service.list_buckets().unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].key, WeekKey::new(2025, 43));
        assert_eq!(weeks[1].key, WeekKey::new(2025, 44));

        let export = exported(service.export(WeekKey::new(2025, 43)).unwrap());

        assert_eq!(export.row_count, 2);
        assert_eq!(export.week, Some(WeekKey::new(2025, 43)));
        assert_eq!(
            export.label.as_deref(),
            Some("Semana 43 de 2025 (20 Oct 2025 - 24 Oct 2025)")
        );
        assert_eq!(export.spreadsheet.file_name, "mantenimiento_2025_semana_43.xlsx");
        assert_eq!(export.pdf.file_name, "mantenimiento_2025_semana_43.pdf");
        assert_eq!(spreadsheet_names(&export.spreadsheet.bytes), vec!["PC-1", "PC-2"]);

        let pdf_text = page_texts(&export.pdf.bytes).concat();
        assert!(pdf_text.contains(&"Semana 43 de 2025 (20 Oct 2025 - 24 Oct 2025)".to_string()));
        assert!(pdf_text.contains(&"PC-1".to_string()));
        assert!(pdf_text.contains(&"PC-2".to_string()));
        assert!(!pdf_text.contains(&"PC-3".to_string()));
    }

    #[test]
    fn test_export_by_label() {
        let (service, _env) = setup(&scenario());

        let export = exported(
            service
                .export_by_label("Semana 44 de 2025 (29 Oct 2025 - 29 Oct 2025)")
                .unwrap(),
        );
        assert_eq!(spreadsheet_names(&export.spreadsheet.bytes), vec!["PC-3"]);

        assert!(matches!(
            service.export_by_label("Semana 01 de 1999"),
            Err(ReportServiceError::WeekNotFound(_))
        ));
    }

    #[test]
    fn test_export_matches_bucketer_selection() {
        let mut records = scenario();
        records.push(EquipmentRecord::named("PC-4").with_maintenance_date("2024-12-30"));
        records.push(EquipmentRecord::named("PC-5").with_maintenance_date("2025-01-01"));
        let (service, _env) = setup(&records);
        let bucketer = WeekBucketer::new();

        for week in service.list_buckets().unwrap() {
            let expected = bucketer.select(&records, week.key).unwrap();
            let export = exported(service.export(week.key).unwrap());
            assert_eq!(export.label.as_deref(), Some(expected.label.as_str()));
            assert_eq!(export.row_count, expected.records.len());

            let by_label = exported(service.export_by_label(&week.label).unwrap());
            assert_eq!(by_label.week, Some(week.key));
            assert_eq!(by_label.spreadsheet.bytes, export.spreadsheet.bytes);
        }

        let first_week = exported(service.export(WeekKey::new(2025, 1)).unwrap());
        assert_eq!(spreadsheet_names(&first_week.spreadsheet.bytes), vec!["PC-4", "PC-5"]);
    }

    #[test]
    fn test_repeated_export_is_byte_identical() {
        let (service, _env) = setup(&scenario());

        let first = exported(service.export(WeekKey::new(2025, 43)).unwrap());
        let second = exported(service.export(WeekKey::new(2025, 43)).unwrap());

        assert_eq!(first.spreadsheet.bytes, second.spreadsheet.bytes);
    }

    #[test]
    fn test_unknown_week_is_not_found() {
        let (service, _env) = setup(&scenario());

        let result = service.export(WeekKey::new(2025, 50));

        assert!(matches!(result, Err(ReportServiceError::WeekNotFound(week)) if week == "2025-W50"));
    }

    #[test]
    fn test_nothing_to_export_without_dated_records() {
        let (service, _env) = setup(&[EquipmentRecord::named("PC-1")]);

        assert!(service.list_buckets().unwrap().is_empty());
        assert_eq!(
            service.export(WeekKey::new(2025, 43)).unwrap(),
            ExportOutcome::NothingToExport
        );

        let (empty_service, _empty_env) = setup(&[]);
        assert_eq!(empty_service.export_all().unwrap(), ExportOutcome::NothingToExport);
    }

    #[test]
    fn test_malformed_date_is_loaded_but_never_bucketed() {
        let mut records = scenario();
        records.push(EquipmentRecord::named("BROKEN").with_maintenance_date("32/13/2025"));
        let (service, env) = setup(&records);

        let loaded = env.connection.create_equipment_repository().load().unwrap();
        assert!(loaded.iter().any(|r| r.name == "BROKEN"));

        let weeks = service.list_buckets().unwrap();
        assert_eq!(weeks.iter().map(|w| w.record_count).sum::<usize>(), 3);

        let all = exported(service.export_all().unwrap());
        assert_eq!(all.row_count, 4);
        assert_eq!(
            spreadsheet_names(&all.spreadsheet.bytes),
            vec!["PC-1", "PC-2", "PC-3", "BROKEN"]
        );
        assert_eq!(all.spreadsheet.file_name, "mantenimiento_preventivo.xlsx");
        assert_eq!(all.label, None);
    }

    #[test]
    fn test_export_to_directory_writes_both_files() {
        let (service, _env) = setup(&scenario());

        let response = service
            .export_to_directory(Some(WeekKey::new(2025, 44)))
            .unwrap();

        assert!(response.exported);
        assert_eq!(response.row_count, 1);
        let spreadsheet_path = PathBuf::from(response.spreadsheet_path.unwrap());
        let pdf_path = PathBuf::from(response.pdf_path.unwrap());
        assert_eq!(
            spreadsheet_path,
            service.export_dir().join("mantenimiento_2025_semana_44.xlsx")
        );
        assert!(spreadsheet_path.exists());
        assert!(fs::read(&pdf_path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_to_directory_with_nothing_to_export() {
        let (service, _env) = setup(&[]);

        let response = service.export_to_directory(None).unwrap();

        assert!(!response.exported);
        assert_eq!(response.row_count, 0);
        assert!(response.spreadsheet_path.is_none());
        assert!(!service.export_dir().exists());
    }
}
