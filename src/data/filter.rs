//! Filter chain narrowing fetched terms to the requested ones.
//!
//! Days outside the requested date range are dropped first. The remaining
//! slots then pass through [`SLOT_PREDICATES`] in order, and a day left with
//! no slots is pruned from the result. Unset criteria match everything.

use slotwatch_types::{DayTerms, FilterCriteria, Slot};

/// A single slot-level filter step.
pub type SlotPredicate = fn(&Slot, &FilterCriteria) -> bool;

/// Slot-level filter steps, applied in this order.
pub const SLOT_PREDICATES: [(&str, SlotPredicate); 3] = [
    ("part_of_day", matches_part_of_day),
    ("clinic", matches_clinic),
    ("doctor", matches_doctor),
];

/// Keep the slot unless a specific part of day was requested and it differs.
pub fn matches_part_of_day(slot: &Slot, criteria: &FilterCriteria) -> bool {
    criteria.part_of_day.is_any() || slot.part_of_day == criteria.part_of_day
}

/// Keep the slot unless a clinic was requested and the slot is elsewhere.
///
/// A slot without a clinic id never matches a requested clinic.
pub fn matches_clinic(slot: &Slot, criteria: &FilterCriteria) -> bool {
    criteria
        .clinic_id
        .is_none_or(|id| slot.clinic_id == Some(id))
}

/// Keep the slot unless a doctor was requested and someone else takes it.
pub fn matches_doctor(slot: &Slot, criteria: &FilterCriteria) -> bool {
    criteria
        .doctor_id
        .is_none_or(|id| slot.doctor_id == Some(id))
}

/// Check a slot against every step of the chain.
pub fn slot_matches(slot: &Slot, criteria: &FilterCriteria) -> bool {
    SLOT_PREDICATES
        .iter()
        .all(|(_, predicate)| predicate(slot, criteria))
}

/// Run the whole chain over the fetched days.
///
/// Day and slot order are preserved. Every returned day holds at least one
/// slot.
pub fn filter_terms(days: Vec<DayTerms>, criteria: &FilterCriteria) -> Vec<DayTerms> {
    let fetched = days.len();

    let filtered: Vec<DayTerms> = days
        .into_iter()
        .filter(|day| criteria.contains_date(day.date))
        .filter_map(|day| {
            let slots: Vec<Slot> = day
                .slots
                .into_iter()
                .filter(|slot| slot_matches(slot, criteria))
                .collect();
            (!slots.is_empty()).then(|| DayTerms::new(day.date, slots))
        })
        .collect();

    tracing::debug!(
        fetched,
        kept = filtered.len(),
        "Filtered terms by {:?}",
        criteria
    );

    filtered
}
