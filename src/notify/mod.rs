//! Notification delivery.
//!
//! A [`Notifier`] hands a rendered report to whoever asked for it. The
//! monitor calls it at most once per run.

mod console;
mod smtp;

pub use console::ConsoleNotifier;
pub use smtp::SmtpNotifier;

use std::fmt::Debug;

use slotwatch_adapters::AdapterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// The mail server could not be configured or refused the message.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for delivering a plain-text message to an address.
pub trait Notifier: Debug {
    fn notify(&self, to: &str, message: &str) -> Result<(), NotifyError>;

    /// Returns a human-readable description of the delivery channel.
    fn description(&self) -> &str;
}
