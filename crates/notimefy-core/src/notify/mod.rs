//! Threshold notifications.
//!
//! A [`Notifier`] delivers one [`Notification`] per run. Whether a run
//! notifies at all is decided by the [`NotificationPolicy`].

mod console;
mod email;

pub use console::ConsoleNotifier;
pub use email::EmailNotifier;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{Channel, Config};
use crate::error::{ConfigError, CoreError, NotifyError};
use crate::tracker::Advance;

/// Every delivery channel implements this trait.
pub trait Notifier {
    /// Short channel name for logs.
    fn name(&self) -> &str;

    /// Deliver `notification`. Any failure is fatal for the run.
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// When a run produces a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationPolicy {
    /// Every run, reporting the last computed threshold even if none was
    /// reached.
    Always,
    /// Only when a threshold was newly surpassed.
    #[default]
    OnChange,
}

impl NotificationPolicy {
    pub fn should_notify(&self, advance: &Advance) -> bool {
        match self {
            NotificationPolicy::Always => true,
            NotificationPolicy::OnChange => advance.surpassed.is_some() && advance.changed,
        }
    }
}

/// A message about the hours logged this month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Threshold reached, `None` when an `Always` run reached nothing.
    pub threshold: Option<u32>,
    pub hours: u64,
    pub period_start: NaiveDate,
}

impl Notification {
    pub fn new(advance: &Advance, hours: u64, period_start: NaiveDate) -> Self {
        Self {
            threshold: advance.surpassed,
            hours,
            period_start,
        }
    }

    /// Single line printed by the console channel.
    pub fn console_line(&self) -> String {
        format!(
            "Surpassed {} hours (currently: {})",
            self.threshold.unwrap_or(0),
            self.hours
        )
    }

    pub fn subject(&self) -> String {
        match self.threshold {
            Some(t) => format!("Surpassed {t} hours this month"),
            None => format!("{} hours logged this month", self.hours),
        }
    }

    pub fn body(&self) -> String {
        let since = self.period_start.format("%Y-%m-%d");
        match self.threshold {
            Some(t) => format!(
                "You have logged {} hours since {since}, reaching the {t} hour threshold.\n",
                self.hours
            ),
            None => format!(
                "You have logged {} hours since {since}. No new threshold was reached.\n",
                self.hours
            ),
        }
    }
}

/// Build the notifier selected by `config.notify.channel`.
///
/// # Errors
///
/// Returns an error if the email channel is selected without SMTP settings
/// or with unparseable addresses.
pub fn from_config(config: &Config) -> Result<Box<dyn Notifier>, CoreError> {
    match config.notify.channel {
        Channel::Console => Ok(Box::new(ConsoleNotifier)),
        Channel::Email => {
            let smtp = config
                .smtp
                .as_ref()
                .ok_or_else(|| ConfigError::MissingKey("smtp".into()))?;
            Ok(Box::new(EmailNotifier::new(smtp)?))
        }
    }
}
