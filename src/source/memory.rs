//! In-memory term source.

use slotwatch_types::{DayTerms, TermQuery};

use super::{FetchError, TermSource};

/// A term source serving a fixed list of days.
///
/// Every fetch returns the same days and records the query it was asked,
/// which makes the source handy for tests and for replaying captured data.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    days: Vec<DayTerms>,
    queries: Vec<TermQuery>,
}

impl MemorySource {
    pub fn new(days: Vec<DayTerms>) -> Self {
        Self {
            days,
            queries: Vec::new(),
        }
    }

    /// Queries received so far, oldest first.
    pub fn queries(&self) -> &[TermQuery] {
        &self.queries
    }
}

impl TermSource for MemorySource {
    fn fetch_terms(&mut self, query: &TermQuery) -> Result<Vec<DayTerms>, FetchError> {
        self.queries.push(query.clone());
        Ok(self.days.clone())
    }

    fn description(&self) -> &str {
        "memory"
    }
}
