//! File-based term source.
//!
//! Reads terms from a JSON file holding an array of days, in the same shape
//! the types serialize to:
//!
//! ```json
//! [
//!   {
//!     "date": "2024-06-10",
//!     "slots": [
//!       { "time": "09:00:00", "doctor_name": "dr Anna Nowak",
//!         "clinic_name": "Clinic X", "clinic_id": 7, "part_of_day": 1 }
//!     ]
//!   }
//! ]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use slotwatch_types::{merge_days, DayTerms, TermQuery};

use super::{FetchError, TermSource};

/// A term source that reads days from a JSON file.
///
/// The file is read again on every fetch. The query is not used to select
/// anything; the filter chain takes care of that. A date listed more than
/// once is merged into its first entry.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TermSource for FileSource {
    fn fetch_terms(&mut self, query: &TermQuery) -> Result<Vec<DayTerms>, FetchError> {
        tracing::debug!(
            "Reading terms from {} (query {:?} is applied by the filters)",
            self.path.display(),
            query
        );
        let content = fs::read_to_string(&self.path)?;
        let days: Vec<DayTerms> = serde_json::from_str(&content)?;
        Ok(merge_days(days))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
