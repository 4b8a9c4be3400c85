//! Slots and the per-day groups they arrive in.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::{ClinicId, DoctorId};

/// Coarse time band of a slot, as tagged by the booking service.
///
/// The numeric code is opaque: the booking service decides which hours
/// belong to which band, so the tag is only ever compared for equality.
/// Code `0` means "any part of the day" and is used by filter criteria to
/// express "no restriction".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PartOfDay(u8);

impl PartOfDay {
    /// No restriction.
    pub const ANY: Self = Self(0);
    pub const MORNING: Self = Self(1);
    pub const MIDDAY: Self = Self(2);
    pub const EVENING: Self = Self(3);

    /// Wrap a raw code received from the booking service.
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// The raw code.
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Returns true for the "any part of the day" tag.
    pub const fn is_any(self) -> bool {
        self.0 == 0
    }

    /// Returns a short label for display.
    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "any",
            1 => "morning",
            2 => "midday",
            3 => "evening",
            _ => "other",
        }
    }
}

impl From<u8> for PartOfDay {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl fmt::Display for PartOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}

/// One bookable appointment opportunity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct Slot {
    /// Start time of the visit (no date component).
    pub time: NaiveTime,

    /// Doctor identifier, absent if the feed omitted it.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub doctor_id: Option<DoctorId>,

    /// Display name of the doctor, see [`doctor_display_name`].
    pub doctor_name: String,

    /// Clinic identifier, absent if the feed omitted it.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub clinic_id: Option<ClinicId>,

    /// Display name of the clinic.
    pub clinic_name: String,

    /// Time band tag assigned by the booking service.
    pub part_of_day: PartOfDay,
}

impl Slot {
    /// Create a slot with the mandatory fields; identifiers start unset and
    /// the part of day starts as [`PartOfDay::ANY`].
    pub fn new(
        time: NaiveTime,
        doctor_name: impl Into<String>,
        clinic_name: impl Into<String>,
    ) -> Self {
        Self {
            time,
            doctor_id: None,
            doctor_name: doctor_name.into(),
            clinic_id: None,
            clinic_name: clinic_name.into(),
            part_of_day: PartOfDay::ANY,
        }
    }

    /// Set the doctor identifier.
    pub fn with_doctor_id(mut self, id: DoctorId) -> Self {
        self.doctor_id = Some(id);
        self
    }

    /// Set the clinic identifier.
    pub fn with_clinic_id(mut self, id: ClinicId) -> Self {
        self.clinic_id = Some(id);
        self
    }

    /// Set the part-of-day tag.
    pub fn with_part_of_day(mut self, part_of_day: impl Into<PartOfDay>) -> Self {
        self.part_of_day = part_of_day.into();
        self
    }
}

/// All slots offered on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct DayTerms {
    pub date: NaiveDate,
    /// Slots in the order they were received; not necessarily sorted.
    pub slots: Vec<Slot>,
}

impl DayTerms {
    pub fn new(date: NaiveDate, slots: Vec<Slot>) -> Self {
        Self { date, slots }
    }

    /// Check if the day has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots on this day.
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Merge days sharing a date into the first one seen.
///
/// Later slots are appended to the earlier day's slots, so every date
/// appears once and both day order and slot order follow the input.
pub fn merge_days(days: impl IntoIterator<Item = DayTerms>) -> Vec<DayTerms> {
    let mut merged: Vec<DayTerms> = Vec::new();

    for day in days {
        match merged.iter_mut().find(|d| d.date == day.date) {
            Some(existing) => existing.slots.extend(day.slots),
            None => merged.push(day),
        }
    }

    merged
}

/// Build a doctor's display name from its optional parts.
///
/// Empty or missing parts are skipped and the rest joined with single
/// spaces, so `(Some("dr"), Some("Anna"), Some("Nowak"))` becomes
/// `"dr Anna Nowak"` and `(None, Some("Anna"), Some("Nowak"))` becomes
/// `"Anna Nowak"`.
pub fn doctor_display_name(
    title: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> String {
    [title, first_name, last_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
