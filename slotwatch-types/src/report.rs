//! Availability report - filtered slots grouped by day and clinic.

use chrono::{NaiveDate, NaiveTime};

/// A single visit listed in a report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitEntry {
    pub doctor_name: String,
    pub time: NaiveTime,
}

/// Visits offered by one clinic on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClinicGroup {
    pub clinic_name: String,
    /// Always equal to `slots.len()`.
    pub count: usize,
    /// Visits in the order they were received.
    pub slots: Vec<VisitEntry>,
}

impl ClinicGroup {
    /// Create an empty group for a clinic.
    pub fn new(clinic_name: impl Into<String>) -> Self {
        Self {
            clinic_name: clinic_name.into(),
            count: 0,
            slots: Vec::new(),
        }
    }

    /// Append a visit, keeping `count` in step.
    pub fn push(&mut self, entry: VisitEntry) {
        self.slots.push(entry);
        self.count = self.slots.len();
    }
}

/// Report section for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayReport {
    pub date: NaiveDate,
    /// Total visits on this date across all clinics.
    pub count: usize,
    /// Groups in first-seen clinic order.
    pub clinic_groups: Vec<ClinicGroup>,
}

/// The filtered and aggregated availability for one monitoring run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    /// Sum of all `DayReport::count` values.
    pub overall_count: usize,
    pub days: Vec<DayReport>,
}

impl Report {
    /// The "nothing available" report.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if any visit survived filtering.
    pub fn is_any_visit_available(&self) -> bool {
        self.overall_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clinic_group_push_tracks_count() {
        let mut group = ClinicGroup::new("Clinic X");
        assert_eq!(group.count, 0);

        group.push(VisitEntry {
            doctor_name: "Anna Nowak".to_string(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        });
        group.push(VisitEntry {
            doctor_name: "Jan Kowalski".to_string(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        });

        assert_eq!(group.count, 2);
        assert_eq!(group.slots[0].doctor_name, "Anna Nowak");
    }

    #[test]
    fn test_empty_report() {
        let report = Report::empty();
        assert_eq!(report.overall_count, 0);
        assert!(report.days.is_empty());
        assert!(!report.is_any_visit_available());
    }
}
