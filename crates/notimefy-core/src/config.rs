//! Application configuration.
//!
//! Stores:
//! - Kimai endpoint and API credentials
//! - The hour thresholds to notify about, in configured order
//! - Notification channel and policy
//! - SMTP settings for the email channel
//!
//! Configuration lives at `~/.config/notimefy/config.toml`. Files ending in
//! `.json` are read as JSON, which also accepts the flat legacy keys
//! (`KimaiUrl`, `KimaiUsername`, `KimaiPassword`, `HourThresholds`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;
use crate::notify::NotificationPolicy;
use crate::storage::config_dir;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Kimai connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KimaiConfig {
    /// API base URL, e.g. `https://kimai.example.com/api`.
    pub url: String,
    pub username: String,
    /// API token (sent as `X-AUTH-TOKEN`).
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Records per page; the server default applies when unset.
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl KimaiConfig {
    /// Host name of the Kimai instance, used to key persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or has no host.
    pub fn host(&self) -> Result<String, ConfigError> {
        let parsed = Url::parse(&self.url).map_err(|e| ConfigError::InvalidValue {
            key: "kimai.url".into(),
            message: e.to_string(),
        })?;
        parsed
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "kimai.url".into(),
                message: format!("'{}' has no host", self.url),
            })
    }
}

/// Where notifications are delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Console,
    Email,
}

/// Notification configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub channel: Channel,
    #[serde(default)]
    pub policy: NotificationPolicy,
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    /// Plain connection upgraded with STARTTLS (port 587).
    #[default]
    Starttls,
    /// TLS from the first byte (port 465).
    Wrapper,
}

/// SMTP submission settings for the email channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address; defaults to `username`.
    #[serde(default)]
    pub from: Option<String>,
    pub to: String,
    #[serde(default)]
    pub tls: SmtpTls,
}

impl SmtpConfig {
    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username)
    }
}

/// Validated application configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub kimai: KimaiConfig,
    pub thresholds: Vec<u32>,
    pub notify: NotifyConfig,
    pub smtp: Option<SmtpConfig>,
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_smtp_port() -> u16 {
    587
}

/// On-disk shape before validation. Every required key is optional here so
/// a missing one is reported by name instead of as a parse error.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    kimai: RawKimai,
    #[serde(default)]
    thresholds: Option<Vec<u32>>,
    #[serde(default)]
    notify: NotifyConfig,
    #[serde(default)]
    smtp: Option<SmtpConfig>,

    #[serde(rename = "KimaiUrl", default)]
    legacy_url: Option<String>,
    #[serde(rename = "KimaiUsername", default)]
    legacy_username: Option<String>,
    #[serde(rename = "KimaiPassword", default)]
    legacy_password: Option<String>,
    #[serde(rename = "HourThresholds", default)]
    legacy_thresholds: Option<Vec<u32>>,
}

#[derive(Debug, Deserialize)]
struct RawKimai {
    url: Option<String>,
    username: Option<String>,
    token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    page_size: Option<u32>,
}

impl Default for RawKimai {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            token: None,
            timeout_secs: default_timeout_secs(),
            page_size: None,
        }
    }
}

fn required(value: Option<String>, key: &str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingKey(key.to_string())),
    }
}

impl RawConfig {
    fn validate(self) -> Result<Config, ConfigError> {
        let kimai = KimaiConfig {
            url: required(self.kimai.url.or(self.legacy_url), "kimai.url")?,
            username: required(
                self.kimai.username.or(self.legacy_username),
                "kimai.username",
            )?,
            token: required(self.kimai.token.or(self.legacy_password), "kimai.token")?,
            timeout_secs: self.kimai.timeout_secs,
            page_size: self.kimai.page_size,
        };
        kimai.host()?;

        if kimai.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "kimai.timeout_secs".into(),
                message: "must be greater than zero".into(),
            });
        }

        let thresholds = self
            .thresholds
            .or(self.legacy_thresholds)
            .ok_or_else(|| ConfigError::MissingKey("thresholds".into()))?;
        // Zero would be reached by any month and reads as "nothing surpassed".
        if let Some(pos) = thresholds.iter().position(|&t| t == 0) {
            return Err(ConfigError::InvalidValue {
                key: format!("thresholds[{pos}]"),
                message: "thresholds must be positive".into(),
            });
        }
        if !thresholds.windows(2).all(|w| w[0] <= w[1]) {
            tracing::warn!(
                ?thresholds,
                "Thresholds are not ascending; the last one reached in list order is reported"
            );
        }

        if self.notify.channel == Channel::Email {
            let smtp = self
                .smtp
                .as_ref()
                .ok_or_else(|| ConfigError::MissingKey("smtp".into()))?;
            if smtp.host.trim().is_empty() {
                return Err(ConfigError::MissingKey("smtp.host".into()));
            }
            if smtp.to.trim().is_empty() {
                return Err(ConfigError::MissingKey("smtp.to".into()));
            }
        }

        Ok(Config {
            kimai,
            thresholds,
            notify: self.notify,
            smtp: self.smtp,
        })
    }
}

impl Config {
    /// Default config file location, `~/.config/notimefy/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load and validate the config at `path`, or at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a required
    /// key is missing or invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
        .map_err(|e| match e {
            ConfigError::ParseFailed { message, .. } => ConfigError::ParseFailed {
                path: path.clone(),
                message,
            },
            other => other,
        })?;

        tracing::debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Parse and validate TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the content does not parse or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::ParseFailed {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        raw.validate()
    }

    /// Parse and validate JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the content does not parse or fails validation.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseFailed {
                path: PathBuf::new(),
                message: e.to_string(),
            })?;
        raw.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
        thresholds = [40, 80, 120]

        [kimai]
        url = "https://kimai.example.com/api"
        username = "jdoe"
        token = "s3cret"
    "#;

    #[test]
    fn minimal_toml_uses_defaults() {
        let cfg = Config::from_toml_str(MINIMAL).unwrap();
        assert_eq!(cfg.thresholds, vec![40, 80, 120]);
        assert_eq!(cfg.kimai.timeout_secs, 30);
        assert_eq!(cfg.kimai.page_size, None);
        assert_eq!(cfg.notify.channel, Channel::Console);
        assert_eq!(cfg.notify.policy, NotificationPolicy::OnChange);
        assert!(cfg.smtp.is_none());
        assert_eq!(cfg.kimai.host().unwrap(), "kimai.example.com");
    }

    #[test]
    fn legacy_json_keys_are_accepted() {
        let cfg = Config::from_json_str(
            r#"{
                "KimaiUrl": "https://time.example.org",
                "KimaiUsername": "jdoe",
                "KimaiPassword": "s3cret",
                "HourThresholds": [10, 20]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.kimai.url, "https://time.example.org");
        assert_eq!(cfg.kimai.token, "s3cret");
        assert_eq!(cfg.thresholds, vec![10, 20]);
    }

    #[test]
    fn missing_required_keys_are_named() {
        let err = Config::from_toml_str("thresholds = [1]\n[kimai]\nusername = \"a\"\ntoken = \"b\"")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "kimai.url"));

        let err = Config::from_toml_str(
            "thresholds = [1]\n[kimai]\nurl = \"https://k.example\"\nusername = \"\"\ntoken = \"b\"",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "kimai.username"));

        let err = Config::from_toml_str(
            "[kimai]\nurl = \"https://k.example\"\nusername = \"a\"\ntoken = \"b\"",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "thresholds"));
    }

    #[test]
    fn empty_threshold_list_is_allowed() {
        let cfg = Config::from_toml_str(
            "thresholds = []\n[kimai]\nurl = \"https://k.example\"\nusername = \"a\"\ntoken = \"b\"",
        )
        .unwrap();
        assert!(cfg.thresholds.is_empty());
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let err = Config::from_toml_str(
            "thresholds = [10, 0]\n[kimai]\nurl = \"https://k.example\"\nusername = \"a\"\ntoken = \"b\"",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "thresholds[1]"));
    }

    #[test]
    fn url_without_host_is_rejected() {
        let err = Config::from_toml_str(
            "thresholds = [1]\n[kimai]\nurl = \"kimai\"\nusername = \"a\"\ntoken = \"b\"",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "kimai.url"));
    }

    #[test]
    fn email_channel_requires_smtp() {
        let content = format!("{MINIMAL}\n[notify]\nchannel = \"email\"\n");
        let err = Config::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "smtp"));
    }

    #[test]
    fn email_channel_with_smtp() {
        let content = format!(
            "{MINIMAL}\n[notify]\nchannel = \"email\"\npolicy = \"always\"\n\n\
             [smtp]\nhost = \"smtp.example.com\"\nusername = \"jdoe@example.com\"\n\
             password = \"pw\"\nto = \"boss@example.com\"\n"
        );
        let cfg = Config::from_toml_str(&content).unwrap();
        let smtp = cfg.smtp.unwrap();
        assert_eq!(cfg.notify.policy, NotificationPolicy::Always);
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.tls, SmtpTls::Starttls);
        assert_eq!(smtp.sender(), "jdoe@example.com");
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempfile::TempDir::new().unwrap();

        let toml_path = dir.path().join("notimefy.toml");
        std::fs::write(&toml_path, MINIMAL).unwrap();
        assert_eq!(Config::load(Some(toml_path.as_path())).unwrap().thresholds, vec![40, 80, 120]);

        let json_path = dir.path().join("notimefy.json");
        let mut file = std::fs::File::create(&json_path).unwrap();
        write!(
            file,
            r#"{{"kimai": {{"url": "https://k.example", "username": "a", "token": "b"}}, "thresholds": [5]}}"#
        )
        .unwrap();
        assert_eq!(Config::load(Some(json_path.as_path())).unwrap().thresholds, vec![5]);
    }

    #[test]
    fn load_reports_missing_file_and_parse_errors_with_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load(Some(missing.as_path())),
            Err(ConfigError::LoadFailed { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "thresholds = [").unwrap();
        match Config::load(Some(broken.as_path())) {
            Err(ConfigError::ParseFailed { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected parse failure, got {other:?}"),
        }
    }
}
