//! Details block of a report.

use slotwatch_types::Report;

use crate::data::format::{format_date, format_time};

/// Header separating the details from the summary.
pub const DETAILS_HEADER: &str = "\n\n--------- REPORT DETAILS ---------";

/// Render every visit grouped by day and clinic.
pub fn render(report: &Report) -> String {
    let mut out = String::from(DETAILS_HEADER);

    for day in &report.days {
        out.push_str(&format!("\nDate: {}\n", format_date(day.date)));
        for group in &day.clinic_groups {
            out.push_str(&format!("\nClinic name: {}\n", group.clinic_name));
            for visit in &group.slots {
                out.push_str(&format!(
                    "[{}] {}\n",
                    format_time(visit.time),
                    visit.doctor_name
                ));
            }
        }
    }

    out
}
