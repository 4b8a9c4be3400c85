//! SMTP adapter for delivering plain-text notifications.
//!
//! Connects with implicit TLS (SMTPS, usually port 465), authenticates with
//! the configured account and sends one message per call. The sender
//! address is the account's username unless set explicitly.
//!
//! ## Example
//!
//! ```rust,ignore
//! use slotwatch_adapters::smtp::SmtpSender;
//!
//! let sender = SmtpSender::builder()
//!     .server("smtp.example.com")
//!     .port(465)
//!     .credentials("alerts@example.com", "app-password")
//!     .build()?;
//!
//! sender.send("patient@example.com", "Overall number of visits: 3\n")?;
//! # Ok::<(), slotwatch_adapters::AdapterError>(())
//! ```

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::AdapterError;

/// Subject used when none is configured.
pub const DEFAULT_SUBJECT: &str = "[slotwatch] Visits are available";

/// Sends notification emails through an SMTP relay.
pub struct SmtpSender {
    transport: SmtpTransport,
    from: Mailbox,
    subject: String,
}

impl std::fmt::Debug for SmtpSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSender")
            .field("from", &self.from.to_string())
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

impl SmtpSender {
    /// Create a new builder for configuring the sender.
    pub fn builder() -> SmtpSenderBuilder {
        SmtpSenderBuilder::default()
    }

    /// Send `body` as a plain-text message to `to`.
    pub fn send(&self, to: &str, body: &str) -> Result<(), AdapterError> {
        let message = self.compose(to, body)?;

        tracing::info!("Sending an email message with notification...");
        self.transport.send(&message)?;
        tracing::info!("The notification has been successfully sent");

        Ok(())
    }

    fn compose(&self, to: &str, body: &str) -> Result<Message, AdapterError> {
        Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(to)?)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AdapterError::Smtp(e.to_string()))
    }
}

/// Builder for SmtpSender.
#[derive(Debug, Default)]
pub struct SmtpSenderBuilder {
    server: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    from: Option<String>,
    subject: Option<String>,
    timeout: Option<Duration>,
}

impl SmtpSenderBuilder {
    /// Set the SMTP server host name.
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Set the SMTP port (default: 465).
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the account used to authenticate.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the sender address (default: the username).
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the message subject (default: [`DEFAULT_SUBJECT`]).
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the connection timeout (default: 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the sender. No connection is opened until the first send.
    pub fn build(self) -> Result<SmtpSender, AdapterError> {
        let server = self
            .server
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AdapterError::Config("SMTP server is required".to_string()))?;
        let (username, password) = match (self.username, self.password) {
            (Some(u), Some(p)) if !u.is_empty() => (u, p),
            _ => {
                return Err(AdapterError::Config(
                    "SMTP credentials are required".to_string(),
                ))
            }
        };

        let from = parse_mailbox(self.from.as_deref().unwrap_or(&username))?;

        let transport = SmtpTransport::relay(&server)?
            .port(self.port.unwrap_or(465))
            .credentials(Credentials::new(username, password))
            .timeout(Some(self.timeout.unwrap_or(Duration::from_secs(30))))
            .build();

        Ok(SmtpSender {
            transport,
            from,
            subject: self.subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, AdapterError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| AdapterError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}
