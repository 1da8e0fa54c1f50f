//! # notimefy Core Library
//!
//! Watches the hours a user has logged in Kimai this month and notifies once
//! per configured threshold. The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Kimai client**: paged `GET /timesheets` for the current month
//! - **Aggregate**: minutes to whole hours
//! - **Tracker**: the threshold state machine, a pure function over
//!   [`TrackerState`]
//! - **Notify**: console or email delivery behind [`Notifier`]
//! - **Storage**: per-host JSON state file and directory resolution
//!
//! ## Key Components
//!
//! - [`Check`]: one complete run
//! - [`advance`]: threshold transition function
//! - [`StateStore`]: tracker state persistence
//! - [`Config`]: validated configuration

pub mod aggregate;
pub mod check;
pub mod config;
pub mod error;
pub mod kimai;
pub mod notify;
pub mod storage;
pub mod tracker;

pub use check::{Check, RunReport};
pub use config::{Channel, Config, KimaiConfig, NotifyConfig, SmtpConfig, SmtpTls};
pub use error::{ConfigError, CoreError, FetchError, NotifyError, StateError};
pub use kimai::{KimaiClient, ReportingPeriod, TimeRecord, TimesheetSource};
pub use notify::{Notification, NotificationPolicy, Notifier};
pub use storage::StateStore;
pub use tracker::{advance, Advance, TrackerState};
