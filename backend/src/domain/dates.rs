//! Parsing of the free-form maintenance date and time cells.
//!
//! The backing table is edited by hand as often as through the form, so the
//! date column ends up holding a mix of ISO dates, timestamps written by
//! spreadsheet tools and the `DD-Mon-YYYY` form used in exported reports.
//! Everything that is not recognised is reported as a [`DateParseError`];
//! callers treat such a field as absent instead of failing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Date layouts accepted in the maintenance date column, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%b-%Y"];

/// Timestamp layouts whose date part is used
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Time layouts accepted in the maintenance time column, tried in order
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M %p", "%I:%M:%S %p"];

/// Canonical storage form of a maintenance date
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical storage form of a maintenance time
pub const STORAGE_TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("No value")]
    Empty,
    #[error("Unrecognised date/time value '{value}'")]
    Invalid { value: String },
}

/// Parse a maintenance date cell
pub fn parse_maintenance_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DateParseError::Empty);
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.date());
        }
    }

    Err(DateParseError::Invalid {
        value: value.to_string(),
    })
}

/// Parse a maintenance time cell
pub fn parse_maintenance_time(raw: &str) -> Result<NaiveTime, DateParseError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DateParseError::Empty);
    }

    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(value, format) {
            return Ok(time);
        }
    }

    // Some tools store a full timestamp in the time column
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.time());
        }
    }

    Err(DateParseError::Invalid {
        value: value.to_string(),
    })
}
