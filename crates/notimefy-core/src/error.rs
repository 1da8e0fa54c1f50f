//! Core error types for notimefy-core.
//!
//! Every failure the library can produce is fatal for the run it occurs in,
//! except for the soft cases (undecodable timesheet page, missing or corrupt
//! tracker state) which never surface as errors at all. The CLI is the single
//! place that turns a [`CoreError`] into an exit status.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for notimefy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Timesheet fetch errors
    #[error("Kimai error: {0}")]
    Fetch(#[from] FetchError),

    /// Notification delivery errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Tracker state persistence errors
    #[error("State error: {0}")]
    State(#[from] StateError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home or data directory could not be determined
    #[error("Could not determine the {0} directory")]
    NoDirectory(&'static str),
}

/// Errors talking to the Kimai timesheet API.
///
/// Page decode failures are not represented here: they end pagination.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request URL could not be built from the configured base URL
    #[error("Invalid timesheet URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Client construction, connection, timeout, or body read failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Notification delivery errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Writing to stdout failed
    #[error("Console write failed: {0}")]
    Console(#[from] std::io::Error),

    /// A sender or recipient address did not parse
    #[error("Invalid email address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The email message could not be assembled
    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    /// SMTP connection, authentication, or submission failure
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Tracker state persistence errors.
///
/// Only writes and deletes fail; an unreadable record loads as absent.
#[derive(Error, Debug)]
pub enum StateError {
    /// Failed to encode the tracker state
    #[error("Failed to encode tracker state: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failed to write the state file or create its directory
    #[error("Failed to write tracker state to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to delete the state file
    #[error("Failed to remove tracker state at {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
