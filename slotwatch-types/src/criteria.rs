//! Caller-supplied narrowing parameters.

use chrono::NaiveDate;

use crate::{ClinicId, DoctorId, PartOfDay};

/// Criteria a slot has to meet to be reported.
///
/// Built once per monitoring run and not changed afterwards. Unset
/// criteria (`part_of_day == PartOfDay::ANY`, `clinic_id == None`,
/// `doctor_id == None`) do not restrict anything.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use slotwatch_types::{FilterCriteria, PartOfDay};
///
/// let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
///
/// let criteria = FilterCriteria::new(from, to)
///     .with_part_of_day(PartOfDay::EVENING)
///     .with_clinic_id(12);
///
/// assert!(criteria.contains_date(to));
/// assert_eq!(criteria.doctor_id, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterCriteria {
    /// First date to consider (inclusive).
    pub from_date: NaiveDate,
    /// Last date to consider (inclusive).
    pub to_date: NaiveDate,
    pub part_of_day: PartOfDay,
    pub clinic_id: Option<ClinicId>,
    pub doctor_id: Option<DoctorId>,
}

impl FilterCriteria {
    /// Criteria restricted to a date range only.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self {
            from_date,
            to_date,
            part_of_day: PartOfDay::ANY,
            clinic_id: None,
            doctor_id: None,
        }
    }

    pub fn with_part_of_day(mut self, part_of_day: impl Into<PartOfDay>) -> Self {
        self.part_of_day = part_of_day.into();
        self
    }

    pub fn with_clinic_id(mut self, clinic_id: ClinicId) -> Self {
        self.clinic_id = Some(clinic_id);
        self
    }

    pub fn with_doctor_id(mut self, doctor_id: DoctorId) -> Self {
        self.doctor_id = Some(doctor_id);
        self
    }

    /// Check whether a date falls within `[from_date, to_date]`.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.from_date <= date && date <= self.to_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_new_is_unrestricted() {
        let criteria = FilterCriteria::new(day(1), day(2));
        assert!(criteria.part_of_day.is_any());
        assert!(criteria.clinic_id.is_none());
        assert!(criteria.doctor_id.is_none());
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let criteria = FilterCriteria::new(day(11), day(12));
        assert!(!criteria.contains_date(day(10)));
        assert!(criteria.contains_date(day(11)));
        assert!(criteria.contains_date(day(12)));
        assert!(!criteria.contains_date(day(13)));
    }

    #[test]
    fn test_inverted_range_contains_nothing() {
        let criteria = FilterCriteria::new(day(12), day(11));
        assert!(!criteria.contains_date(day(11)));
        assert!(!criteria.contains_date(day(12)));
    }
}
