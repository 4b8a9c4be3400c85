//! Data processing for term monitoring.
//!
//! Narrows fetched terms down to the ones a patient asked for and condenses
//! the survivors into an availability [`Report`](slotwatch_types::Report).

pub mod filter;
pub mod format;
pub mod report;

pub use filter::{filter_terms, slot_matches, SlotPredicate, SLOT_PREDICATES};
pub use report::{aggregate, aggregate_day};
