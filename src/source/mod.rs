//! Term and lookup source abstraction.
//!
//! A term source answers a [`TermQuery`] with the free visit terms grouped
//! by day; a lookup source lists the ids accepted by a query (cities,
//! services, clinics, doctors). The booking portal provides both, a JSON
//! file or an in-memory list can stand in for terms.

mod file;
mod memory;
mod portal;

pub use file::FileSource;
pub use memory::MemorySource;
pub use portal::PortalSource;

use std::fmt::Debug;

use slotwatch_adapters::AdapterError;
use slotwatch_types::{DayTerms, LookupEntry, TermQuery};
use thiserror::Error;

/// Errors surfaced by a source. Any of them aborts the run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The booking service could not be reached or answered badly.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Trait for fetching free visit terms.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use slotwatch::{MemorySource, TermSource};
/// use slotwatch_types::TermQuery;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let mut source = MemorySource::new(Vec::new());
/// let days = source.fetch_terms(&TermQuery::new(5, 4502, date, date)).unwrap();
/// assert!(days.is_empty());
/// ```
pub trait TermSource: Debug {
    /// Fetch the terms for `query`.
    ///
    /// Sources may return more than asked for (other dates, clinics or
    /// doctors); the filter chain narrows the result afterwards.
    fn fetch_terms(&mut self, query: &TermQuery) -> Result<Vec<DayTerms>, FetchError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

/// Trait for listing the dictionaries a query is built from.
pub trait LookupSource: Debug {
    fn cities(&mut self) -> Result<Vec<LookupEntry>, FetchError>;

    fn services(&mut self) -> Result<Vec<LookupEntry>, FetchError>;

    fn clinics(&mut self, city_id: u64, service_id: u64) -> Result<Vec<LookupEntry>, FetchError>;

    /// Doctors for a city and service, limited to one clinic when given.
    fn doctors(
        &mut self,
        city_id: u64,
        service_id: u64,
        clinic_id: Option<u64>,
    ) -> Result<Vec<LookupEntry>, FetchError>;
}
