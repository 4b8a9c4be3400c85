//! Dictionary entries (cities, services, clinics, doctors).

/// An `(id, name)` pair from one of the booking service's dictionaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookupEntry {
    pub id: u64,
    pub name: String,
}

impl LookupEntry {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Sort entries by name, keeping the relative order of equal names.
pub fn sort_by_name(entries: &mut [LookupEntry]) {
    entries.sort_by(|a, b| a.name.cmp(&b.name));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_name_is_stable() {
        let mut entries = vec![
            LookupEntry::new(3, "Wola"),
            LookupEntry::new(1, "Mokotow"),
            LookupEntry::new(2, "Mokotow"),
        ];
        sort_by_name(&mut entries);

        let ids: Vec<u64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
