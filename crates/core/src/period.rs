//! Calendar dates and inclusive date ranges.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Inclusive calendar range `[start, end]`.
///
/// Not validated: an inverted range is kept as given and simply overlaps
/// less (or nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Shared boundary days count as overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

/// `[s1, e1]` and `[s2, e2]` overlap iff `s1 <= e2 && e1 >= s2`.
pub fn overlaps(s1: NaiveDate, e1: NaiveDate, s2: NaiveDate, e2: NaiveDate) -> bool {
    s1 <= e2 && e1 >= s2
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or an RFC 3339 timestamp into
/// its calendar date.
pub fn parse_calendar_date(input: &str) -> DomainResult<NaiveDate> {
    let s = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.date());
    }
    Err(DomainError::validation(format!("unrecognised date: {input:?}")))
}

/// Parse a point in time: a plain `YYYY-MM-DD` is midnight UTC of that day,
/// an RFC 3339 timestamp keeps its offset, a bare `YYYY-MM-DDTHH:MM:SS` is UTC.
pub fn parse_instant(input: &str) -> DomainResult<DateTime<Utc>> {
    let s = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(start_of_day(date));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    Err(DomainError::validation(format!("unrecognised timestamp: {input:?}")))
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}
