//! Parameters of a term lookup sent to a booking service.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::{ClinicId, DoctorId, FilterCriteria, PartOfDay};

/// Language the doctor speaks during the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitLanguage {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "pl"))]
    Polish,
    #[cfg_attr(feature = "serde", serde(rename = "eng"))]
    English,
}

impl VisitLanguage {
    /// Short code as typed on the command line.
    pub fn code(self) -> &'static str {
        match self {
            VisitLanguage::Polish => "pl",
            VisitLanguage::English => "eng",
        }
    }
}

impl fmt::Display for VisitLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for VisitLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pl" => Ok(VisitLanguage::Polish),
            "eng" => Ok(VisitLanguage::English),
            other => Err(format!("Unknown visit language '{}', expected pl or eng", other)),
        }
    }
}

/// What to ask a term source for.
///
/// The clinic and doctor are forwarded so the booking service can narrow
/// the result server-side, but sources are free to ignore them; the filter
/// chain applies them again.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TermQuery {
    pub city_id: u64,
    pub service_id: u64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub clinic_id: Option<ClinicId>,
    pub doctor_id: Option<DoctorId>,
    /// Only the booking service can narrow by language; slots do not carry it.
    pub language: VisitLanguage,
}

impl TermQuery {
    pub fn new(city_id: u64, service_id: u64, from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self {
            city_id,
            service_id,
            from_date,
            to_date,
            clinic_id: None,
            doctor_id: None,
            language: VisitLanguage::default(),
        }
    }

    pub fn with_clinic_id(mut self, clinic_id: Option<ClinicId>) -> Self {
        self.clinic_id = clinic_id;
        self
    }

    pub fn with_doctor_id(mut self, doctor_id: Option<DoctorId>) -> Self {
        self.doctor_id = doctor_id;
        self
    }

    pub fn with_language(mut self, language: VisitLanguage) -> Self {
        self.language = language;
        self
    }

    /// Filter criteria matching this query, restricted to `part_of_day`.
    pub fn criteria(&self, part_of_day: PartOfDay) -> FilterCriteria {
        FilterCriteria {
            from_date: self.from_date,
            to_date: self.to_date,
            part_of_day,
            clinic_id: self.clinic_id,
            doctor_id: self.doctor_id,
        }
    }
}
