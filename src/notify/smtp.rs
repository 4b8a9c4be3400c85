//! Email notifier.

use std::time::Duration;

use slotwatch_adapters::smtp::SmtpSender;

use super::{Notifier, NotifyError};
use crate::config::EmailSettings;

/// Sends the message as an email through the configured SMTP account.
#[derive(Debug)]
pub struct SmtpNotifier {
    sender: SmtpSender,
    description: String,
}

impl SmtpNotifier {
    pub fn new(sender: SmtpSender, description: impl Into<String>) -> Self {
        Self {
            sender,
            description: description.into(),
        }
    }

    /// Create a notifier from the `[email]` settings.
    pub fn from_settings(settings: &EmailSettings) -> Result<Self, NotifyError> {
        let mut builder = SmtpSender::builder()
            .server(&settings.smtp_server)
            .credentials(&settings.username, &settings.password)
            .timeout(Duration::from_secs(30));
        if let Some(port) = settings.smtp_port {
            builder = builder.port(port);
        }

        let description = format!(
            "smtp: {}@{}",
            settings.username, settings.smtp_server
        );
        Ok(Self::new(builder.build()?, description))
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self, to: &str, message: &str) -> Result<(), NotifyError> {
        Ok(self.sender.send(to, message)?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EmailSettings {
        EmailSettings {
            username: "alerts@example.com".to_string(),
            password: "app-password".to_string(),
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: Some(465),
        }
    }

    #[test]
    fn test_from_settings() {
        let notifier = SmtpNotifier::from_settings(&settings()).unwrap();
        assert_eq!(notifier.description(), "smtp: alerts@example.com@smtp.example.com");
    }

    #[test]
    fn test_invalid_sender_is_rejected() {
        let mut settings = settings();
        settings.username = "alerts".to_string();

        let err = SmtpNotifier::from_settings(&settings).unwrap_err();
        assert!(matches!(err, NotifyError::Adapter(_)));
    }
}
