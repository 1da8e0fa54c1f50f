use std::io::Write;

use super::{Notification, Notifier};
use crate::error::NotifyError;

/// Prints the notification as a single line on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn name(&self) -> &str {
        "console"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", notification.console_line())?;
        out.flush()?;
        Ok(())
    }
}
