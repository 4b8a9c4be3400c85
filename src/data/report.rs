//! Aggregation of filtered terms into an availability report.

use slotwatch_types::{ClinicGroup, DayReport, DayTerms, Report, VisitEntry};

/// Build a report from filtered days.
///
/// Days keep their input order. Within a day, slots are grouped by clinic
/// name; groups appear in the order their clinic was first seen and keep
/// the input slot order.
pub fn aggregate(days: &[DayTerms]) -> Report {
    let days: Vec<DayReport> = days.iter().map(aggregate_day).collect();
    let overall_count = days.iter().map(|d| d.count).sum();

    Report {
        overall_count,
        days,
    }
}

/// Group one day's slots by clinic name.
pub fn aggregate_day(day: &DayTerms) -> DayReport {
    let mut groups: Vec<ClinicGroup> = Vec::new();

    for slot in &day.slots {
        let entry = VisitEntry {
            doctor_name: slot.doctor_name.clone(),
            time: slot.time,
        };

        match groups
            .iter_mut()
            .find(|g| g.clinic_name == slot.clinic_name)
        {
            Some(group) => group.push(entry),
            None => {
                let mut group = ClinicGroup::new(slot.clinic_name.clone());
                group.push(entry);
                groups.push(group);
            }
        }
    }

    DayReport {
        date: day.date,
        count: groups.iter().map(|g| g.count).sum(),
        clinic_groups: groups,
    }
}
