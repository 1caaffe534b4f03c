//! Weekly grouping of maintenance records.
//!
//! Records are grouped by the ISO-8601 week of their maintenance date. The
//! key uses the ISO week-numbering year, not the calendar year: 2024-12-30
//! belongs to week 1 of 2025 and 2027-01-01 to week 53 of 2026. Records
//! whose date cannot be parsed are left out of every bucket; they stay in the
//! store and still show up in full exports.
//!
//! Bucket labels read `Semana 43 de 2025 (20 Oct 2025 - 24 Oct 2025)`. The
//! range is the span of the member dates, not the Monday-Sunday bounds of
//! the week, and the key is part of the label so two buckets never share one.

use chrono::{Datelike, NaiveDate};
use log::debug;
use shared::{EquipmentRecord, WeekKey, WeekSummary};
use std::collections::BTreeMap;

use crate::domain::dates::parse_maintenance_date;
use crate::domain::models::WeekBucket;

/// Date layout used inside bucket labels
const LABEL_DATE_FORMAT: &str = "%d %b %Y";

/// Groups records into ISO weeks and labels the groups
#[derive(Clone, Debug, Default)]
pub struct WeekBucketer;

impl WeekBucketer {
    pub fn new() -> Self {
        Self
    }

    /// ISO (week-numbering year, week) of a date
    pub fn week_key(&self, date: NaiveDate) -> WeekKey {
        let iso = date.iso_week();
        WeekKey::new(iso.year(), iso.week())
    }

    /// Human-readable label of a bucket
    pub fn label(&self, key: WeekKey, first_date: NaiveDate, last_date: NaiveDate) -> String {
        format!(
            "Semana {:02} de {} ({} - {})",
            key.week,
            key.year,
            first_date.format(LABEL_DATE_FORMAT),
            last_date.format(LABEL_DATE_FORMAT)
        )
    }

    /// Group every record with a parseable maintenance date by ISO week.
    ///
    /// The map iterates in ascending (year, week) order; members keep their
    /// store order.
    pub fn bucket(&self, records: &[EquipmentRecord]) -> BTreeMap<WeekKey, WeekBucket> {
        let mut grouped: BTreeMap<WeekKey, Vec<(NaiveDate, &EquipmentRecord)>> = BTreeMap::new();

        for record in records {
            match parse_maintenance_date(&record.maintenance_date) {
                Ok(date) => grouped
                    .entry(self.week_key(date))
                    .or_default()
                    .push((date, record)),
                Err(e) => debug!("Record '{}' left out of weekly buckets: {}", record.name, e),
            }
        }

        grouped
            .into_iter()
            .filter_map(|(key, members)| {
                let first_date = members.iter().map(|(date, _)| *date).min()?;
                let last_date = members.iter().map(|(date, _)| *date).max()?;
                let bucket = WeekBucket {
                    key,
                    label: self.label(key, first_date, last_date),
                    first_date,
                    last_date,
                    records: members.into_iter().map(|(_, record)| record.clone()).collect(),
                };
                Some((key, bucket))
            })
            .collect()
    }

    /// Selectable weeks, ordered by (year, week)
    pub fn list(&self, records: &[EquipmentRecord]) -> Vec<WeekSummary> {
        self.bucket(records)
            .values()
            .map(WeekBucket::summary)
            .collect()
    }

    /// The bucket for `key`, if any record falls in that week
    pub fn select(&self, records: &[EquipmentRecord], key: WeekKey) -> Option<WeekBucket> {
        self.bucket(records).remove(&key)
    }

    /// The bucket whose label is exactly `label`
    pub fn select_by_label(&self, records: &[EquipmentRecord], label: &str) -> Option<WeekBucket> {
        self.bucket(records)
            .into_values()
            .find(|bucket| bucket.label == label)
    }
}
