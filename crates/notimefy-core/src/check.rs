//! One threshold check.
//!
//! ```text
//! fetch records -> total hours -> advance tracker -> notify? -> save state
//! ```
//!
//! State is saved only after a required notification went out, so a failed
//! send is retried by the next run.

use serde::Serialize;

use crate::aggregate::total_hours;
use crate::error::Result;
use crate::kimai::{ReportingPeriod, TimesheetSource};
use crate::notify::{Notification, NotificationPolicy, Notifier};
use crate::storage::StateStore;
use crate::tracker::advance;

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub month: String,
    pub hours: u64,
    pub surpassed: Option<u32>,
    pub notified: bool,
    pub remaining: Vec<u32>,
}

/// Everything a run needs besides the clock.
pub struct Check<'a> {
    pub thresholds: &'a [u32],
    pub policy: NotificationPolicy,
    pub source: &'a dyn TimesheetSource,
    pub store: &'a StateStore,
    pub notifier: &'a dyn Notifier,
}

impl Check<'_> {
    /// Run one check for `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching timesheets, sending the notification, or
    /// saving the state fails.
    pub fn run(&self, period: &ReportingPeriod) -> Result<RunReport> {
        let records = self.source.fetch_records(period)?;
        let hours = total_hours(&records);
        let month = period.month_tag();
        tracing::info!(%month, hours, "Hours logged this month");

        let previous = self.store.load();
        let outcome = advance(previous, self.thresholds, hours, &month);
        if let Some(threshold) = outcome.surpassed {
            tracing::info!(threshold, hours, "Threshold surpassed");
        }

        let notified = self.policy.should_notify(&outcome);
        if notified {
            let notification = Notification::new(&outcome, hours, period.start_date());
            self.notifier.notify(&notification)?;
            tracing::debug!(channel = self.notifier.name(), "Notification delivered");
        }

        self.store.save(&outcome.state)?;

        Ok(RunReport {
            month,
            hours,
            surpassed: outcome.surpassed,
            notified,
            remaining: outcome.state.remaining_thresholds,
        })
    }
}
