//! Console notifier for dry runs.

use std::io::{self, Write};

use super::{Notifier, NotifyError};

/// Prints the message to stdout instead of sending it.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    fn write_to(&self, out: &mut impl Write, to: &str, message: &str) -> io::Result<()> {
        writeln!(out, "To: {}", to)?;
        writeln!(out)?;
        writeln!(out, "{}", message)?;
        out.flush()
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, to: &str, message: &str) -> Result<(), NotifyError> {
        tracing::info!("Dry run, printing the notification instead of sending it");
        self.write_to(&mut io::stdout().lock(), to, message)?;
        Ok(())
    }

    fn description(&self) -> &str {
        "console"
    }
}
