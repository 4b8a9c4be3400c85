//! Plain-text rendering.
//!
//! - [`summary`]: per-day and per-clinic visit counts
//! - [`detail`]: every visit with its time and doctor
//! - [`table`]: lookup listings (cities, services, clinics, doctors)

pub mod detail;
pub mod summary;
pub mod table;

use slotwatch_types::Report;

/// Full notification body: the summary followed by the details.
pub fn render_message(report: &Report) -> String {
    let mut message = summary::render(report);
    message.push_str(&detail::render(report));
    message
}
