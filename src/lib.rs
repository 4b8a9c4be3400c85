//! # slotwatch
//!
//! Watches a medical booking portal for free visit slots and tells the
//! patient, by email, when something matching their criteria shows up.
//!
//! ## Architecture
//!
//! A run is a straight pipeline. Only the last stage has side effects.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                             Monitor                              │
//! │  ┌─────────┐    ┌──────────┐    ┌───────────┐    ┌────────────┐  │
//! │  │ source  │───▶│  filter  │───▶│ aggregate │───▶│   render   │  │
//! │  │ (terms) │    │ (chain)  │    │ (report)  │    │  (message) │  │
//! │  └────┬────┘    └──────────┘    └───────────┘    └─────┬──────┘  │
//! │       │                                                │         │
//! │       ▼                                                ▼         │
//! │  PortalSource | FileSource | MemorySource      ┌────────────┐    │
//! │                                                │  notify    │    │
//! │                                                │ (if any)   │    │
//! │                                                └────────────┘    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: [`TermSource`] and [`LookupSource`] traits with the
//!   portal, file and in-memory implementations
//! - **[`data`]**: the filter chain and the aggregator turning days of slots
//!   into a [`Report`]
//! - **[`render`]**: the plain-text report and lookup tables
//! - **[`notify`]**: the [`Notifier`] trait with email and console delivery
//! - **[`monitor`]**: ties the stages together and decides whether to notify
//! - **[`config`]**: settings file and environment loading
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Look up ids
//! slotwatch cities
//! slotwatch clinics -c 5 -s 4502
//!
//! # Notify about morning visits until the end of June
//! slotwatch monitor -e patient@example.com -c 5 -s 4502 -t 2024-06-30 --part-of-day 1
//! ```
//!
//! ### As a library
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use slotwatch::{aggregate, filter_terms, render_message};
//! use slotwatch_types::{DayTerms, FilterCriteria, PartOfDay, Slot};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
//! let days = vec![DayTerms::new(
//!     date,
//!     vec![
//!         Slot::new(NaiveTime::from_hms_opt(9, 0, 0).unwrap(), "DocA", "ClinicX")
//!             .with_part_of_day(PartOfDay::MORNING),
//!         Slot::new(NaiveTime::from_hms_opt(14, 0, 0).unwrap(), "DocB", "ClinicY")
//!             .with_part_of_day(PartOfDay::MIDDAY),
//!     ],
//! )];
//!
//! let criteria = FilterCriteria::new(date, date).with_part_of_day(PartOfDay::MORNING);
//! let report = aggregate(&filter_terms(days, &criteria));
//!
//! assert_eq!(report.overall_count, 1);
//! assert!(render_message(&report).contains("[09:00] DocA"));
//! ```

pub mod config;
pub mod data;
pub mod monitor;
pub mod notify;
pub mod render;
pub mod source;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, EmailSettings, PortalSettings};
pub use data::{aggregate, filter_terms};
pub use monitor::{Monitor, MonitorError, RunOutcome};
pub use notify::{ConsoleNotifier, Notifier, NotifyError, SmtpNotifier};
pub use render::render_message;
pub use slotwatch_types::Report;
pub use source::{FetchError, FileSource, LookupSource, MemorySource, PortalSource, TermSource};
