use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

/// Timestamp layout Kimai accepts for `begin` / `end` (local time, no zone).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Layout of the month tag stored with the tracker state.
pub const MONTH_FORMAT: &str = "%Y-%m";

/// The span from the first instant of the current month up to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl ReportingPeriod {
    /// Period for the month containing `now`, ending at `now`.
    pub fn month_to(now: NaiveDateTime) -> Self {
        let first_day = now.date().with_day(1).unwrap_or(now.date());
        Self {
            start: first_day.and_time(chrono::NaiveTime::MIN),
            end: now,
        }
    }

    /// Period for the current local month.
    pub fn current() -> Self {
        Self::month_to(Local::now().naive_local())
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// `YYYY-MM` tag identifying the tracked month.
    pub fn month_tag(&self) -> String {
        self.start.format(MONTH_FORMAT).to_string()
    }

    pub fn begin_param(&self) -> String {
        self.start.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(TIMESTAMP_FORMAT).to_string()
    }
}
