//! Kimai timesheet access.
//!
//! Only the subset of the Kimai REST API needed to total a month of logged
//! time: `GET /timesheets` with a date range, paged until the server stops
//! returning record lists.

pub mod client;
pub mod period;

pub use client::KimaiClient;
pub use period::ReportingPeriod;

use serde::Deserialize;

use crate::error::FetchError;

/// A single timesheet entry. Everything but the duration is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimeRecord {
    /// Logged minutes; `null` or missing for a timesheet still running.
    #[serde(default)]
    duration: Option<u64>,
}

impl TimeRecord {
    pub fn new(duration_minutes: u64) -> Self {
        Self {
            duration: Some(duration_minutes),
        }
    }

    pub fn duration_minutes(&self) -> u64 {
        self.duration.unwrap_or(0)
    }
}

/// Static API credentials sent as `X-AUTH-USER` / `X-AUTH-TOKEN`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

/// Anything that can list the records logged within a period.
pub trait TimesheetSource {
    fn fetch_records(&self, period: &ReportingPeriod) -> Result<Vec<TimeRecord>, FetchError>;
}
