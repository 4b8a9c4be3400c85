//! Application settings.
//!
//! Settings are read once per process from a configuration file (TOML by
//! default, any format the `config` crate recognises by extension) and
//! overridden by `SLOTWATCH_`-prefixed environment variables, where `__`
//! separates the section from the key:
//!
//! ```toml
//! [portal]
//! username = "patient@example.com"
//! password = "secret"
//! language = "pl"
//!
//! [email]
//! username = "alerts@example.com"
//! password = "app-password"
//! smtp_server = "smtp.example.com"
//! smtp_port = 465
//! ```
//!
//! `SLOTWATCH_PORTAL__PASSWORD=...` replaces `portal.password`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

/// Configuration file used when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "SLOTWATCH";

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("A value for field '{field}' in section '{section}' is not set in {file}")]
    MissingField {
        section: &'static str,
        field: &'static str,
        file: String,
    },
}

/// Booking portal account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortalSettings {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Language of the portal's answers, e.g. `pl` or `en`.
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Mail account used to send notifications.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailSettings {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub smtp_server: String,
    #[serde(default)]
    pub smtp_port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub portal: PortalSettings,
    #[serde(default)]
    pub email: Option<EmailSettings>,
    /// Where the settings were read from, used in error messages.
    #[serde(skip)]
    pub origin: String,
}

impl AppConfig {
    /// Load settings from `path` (or [`DEFAULT_CONFIG_FILE`]) and the
    /// environment.
    ///
    /// An explicitly given file must exist. The default file is optional so
    /// that the environment alone can configure the tool.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let settings = Config::builder()
            .add_source(File::from(path.as_path()).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        config.origin = path.display().to_string();
        tracing::debug!("Configuration loaded from {}", config.origin);
        Ok(config)
    }

    /// Portal settings, checked for mandatory values.
    pub fn portal(&self) -> Result<&PortalSettings, ConfigError> {
        let portal = &self.portal;
        self.require("portal", "username", &portal.username)?;
        self.require("portal", "password", &portal.password)?;
        self.require("portal", "language", &portal.language)?;
        Ok(portal)
    }

    /// Email settings, checked for mandatory values.
    pub fn email(&self) -> Result<&EmailSettings, ConfigError> {
        let Some(email) = &self.email else {
            return Err(self.missing("email", "username"));
        };
        self.require("email", "username", &email.username)?;
        self.require("email", "password", &email.password)?;
        self.require("email", "smtp_server", &email.smtp_server)?;
        if email.smtp_port.is_none() {
            return Err(self.missing("email", "smtp_port"));
        }
        Ok(email)
    }

    fn require(
        &self,
        section: &'static str,
        field: &'static str,
        value: &str,
    ) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            Err(self.missing(section, field))
        } else {
            Ok(())
        }
    }

    fn missing(&self, section: &'static str, field: &'static str) -> ConfigError {
        ConfigError::MissingField {
            section,
            field,
            file: self.origin.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const FULL: &str = r#"
[portal]
username = "patient@example.com"
password = "secret"
language = "en"

[email]
username = "alerts@example.com"
password = "app-password"
smtp_server = "smtp.example.com"
smtp_port = 465
"#;

    #[test]
    fn test_load_full_config() {
        let file = write_config(FULL);
        let config = AppConfig::load(Some(file.path())).unwrap();

        let portal = config.portal().unwrap();
        assert_eq!(portal.username, "patient@example.com");
        assert_eq!(portal.language, "en");
        assert_eq!(portal.base_url, None);
        assert_eq!(portal.timeout_secs, 30);

        let email = config.email().unwrap();
        assert_eq!(email.smtp_server, "smtp.example.com");
        assert_eq!(email.smtp_port, Some(465));
    }

    #[test]
    fn test_optional_portal_settings() {
        let file = write_config(
            r#"
[portal]
username = "patient@example.com"
password = "secret"
language = "pl"
base_url = "http://localhost:8080"
timeout_secs = 5
"#,
        );
        let config = AppConfig::load(Some(file.path())).unwrap();
        let portal = config.portal().unwrap();

        assert_eq!(portal.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(portal.timeout_secs, 5);
    }

    #[test]
    fn test_missing_portal_field() {
        let file = write_config(
            r#"
[portal]
username = "patient@example.com"
language = "pl"
"#,
        );
        let config = AppConfig::load(Some(file.path())).unwrap();
        let err = config.portal().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingField {
                section: "portal",
                field: "password",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            format!(
                "A value for field 'password' in section 'portal' is not set in {}",
                file.path().display()
            )
        );
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let file = write_config(
            r#"
[portal]
username = "patient@example.com"
password = "secret"
language = "  "
"#,
        );
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(matches!(
            config.portal(),
            Err(ConfigError::MissingField {
                field: "language",
                ..
            })
        ));
    }

    #[test]
    fn test_email_section_is_optional_until_needed() {
        let file = write_config(
            r#"
[portal]
username = "patient@example.com"
password = "secret"
language = "pl"
"#,
        );
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert!(config.portal().is_ok());
        assert!(matches!(
            config.email(),
            Err(ConfigError::MissingField {
                section: "email",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_smtp_port() {
        let file = write_config(
            r#"
[email]
username = "alerts@example.com"
password = "app-password"
smtp_server = "smtp.example.com"
"#,
        );
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(matches!(
            config.email(),
            Err(ConfigError::MissingField {
                field: "smtp_port",
                ..
            })
        ));
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/slotwatch.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
