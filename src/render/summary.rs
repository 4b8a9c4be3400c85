//! Summary block of a report.

use slotwatch_types::Report;

use crate::data::format::format_date;

/// Render visit counts for the whole report, each day and each clinic.
pub fn render(report: &Report) -> String {
    let mut out = format!("Overall number of visits: {}\n\n", report.overall_count);

    for day in &report.days {
        out.push_str(&format!("Date: {}\n", format_date(day.date)));
        out.push_str(&format!("Visits available in that day: {}\n", day.count));
        out.push_str("Number of visits in particular clinics: \n");
        for group in &day.clinic_groups {
            out.push_str(&format!("* {}: {}\n", group.clinic_name, group.count));
        }
        out.push('\n');
    }

    out
}
