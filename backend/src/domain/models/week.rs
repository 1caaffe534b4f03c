use chrono::NaiveDate;
use shared::{EquipmentRecord, WeekKey, WeekSummary};

/// Records sharing one ISO (year, week), derived on every view and never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBucket {
    pub key: WeekKey,
    pub label: String,
    /// Earliest member maintenance date
    pub first_date: NaiveDate,
    /// Latest member maintenance date
    pub last_date: NaiveDate,
    /// Member records, in store order
    pub records: Vec<EquipmentRecord>,
}

impl WeekBucket {
    pub fn summary(&self) -> WeekSummary {
        WeekSummary {
            label: self.label.clone(),
            key: self.key,
            record_count: self.records.len(),
            first_date: self.first_date,
            last_date: self.last_date,
        }
    }
}
