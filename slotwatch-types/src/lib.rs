//! # slotwatch-types
//!
//! Core types for visit slot monitoring. This crate defines the data model
//! shared by every part of slotwatch: the slots a booking service offers for
//! one day, the criteria used to narrow them down, and the availability
//! report built from what survives.
//!
//! ## Design Goals
//!
//! - **Typed, immutable values**: every entity has named, typed fields;
//!   upstream payloads are converted into these types at the boundary
//! - **Vendor agnostic**: nothing here knows which booking portal produced
//!   the data
//! - **Optional serialization**: enable the `serde` feature to read and write
//!   the model as JSON (term files, report export)
//!
//! ## Features
//!
//! - `serde`: serialization via serde (also enables `chrono/serde`)
//!
//! ## Example
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use slotwatch_types::{DayTerms, FilterCriteria, PartOfDay, Slot};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
//! let day = DayTerms::new(
//!     date,
//!     vec![Slot::new(NaiveTime::from_hms_opt(9, 0, 0).unwrap(), "dr Anna Nowak", "Clinic X")
//!         .with_clinic_id(7)
//!         .with_part_of_day(PartOfDay::MORNING)],
//! );
//!
//! let criteria = FilterCriteria::new(date, date).with_part_of_day(PartOfDay::MORNING);
//! assert!(criteria.contains_date(day.date));
//! assert_eq!(day.len(), 1);
//! ```

mod criteria;
mod lookup;
mod query;
mod report;
mod slot;

pub use criteria::*;
pub use lookup::*;
pub use query::*;
pub use report::*;
pub use slot::*;

/// Identifier of a clinic as assigned by the booking service.
pub type ClinicId = u64;

/// Identifier of a doctor as assigned by the booking service.
pub type DoctorId = u64;
