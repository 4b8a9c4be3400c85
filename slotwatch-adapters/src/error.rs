//! Error types for adapters.

use thiserror::Error;

/// Errors that can occur while talking to the booking portal or the mail
/// server.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// HTTP request failed or returned an unexpected status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The service answered 503, usually a maintenance window.
    #[error("Service unavailable, probably down for maintenance")]
    Unavailable,

    /// Adapter was configured with invalid settings.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// An email address could not be parsed.
    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The mail server rejected or failed to deliver the message.
    #[error("Unable to send the email: {0}")]
    Smtp(String),
}

#[cfg(feature = "portal")]
impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdapterError::Timeout
        } else if err.is_connect() {
            AdapterError::Connection(err.to_string())
        } else if err.is_decode() {
            AdapterError::Parse(err.to_string())
        } else {
            AdapterError::Http(err.to_string())
        }
    }
}

#[cfg(feature = "smtp")]
impl From<lettre::transport::smtp::Error> for AdapterError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        AdapterError::Smtp(err.to_string())
    }
}
