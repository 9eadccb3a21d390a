use salvage_types::{Group, Record};

/// Recovered records grouped by destination.
///
/// Groups iterate in the order they were first seen and records within a
/// group in the order they were added. Metadata records and records no
/// rule matched are counted, not kept.
#[derive(Clone, Debug, Default)]
pub struct CollectionRegistry {
    groups: Vec<(Group, Vec<Record>)>,
    metadata_skipped: usize,
    unclassified: usize,
}

impl CollectionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// File `record` under `group`. Returns whether it was kept.
    pub fn insert(&mut self, group: Option<Group>, record: Record) -> bool {
        let group = match group {
            Some(group) if group.is_persisted() => group,
            Some(_) => {
                self.metadata_skipped += 1;
                return false;
            }
            None => {
                self.unclassified += 1;
                return false;
            }
        };

        match self.groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, records)) => records.push(record),
            None => self.groups.push((group, vec![record])),
        }
        true
    }

    /// Groups and their records, in first-discovery order.
    pub fn groups(&self) -> impl Iterator<Item = (Group, &[Record])> {
        self.groups
            .iter()
            .map(|(group, records)| (*group, records.as_slice()))
    }

    #[must_use]
    pub fn get(&self, group: Group) -> Option<&[Record]> {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, records)| records.as_slice())
    }

    /// Number of non-empty groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Records kept across all groups.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|(_, records)| records.len()).sum()
    }

    #[must_use]
    pub fn metadata_skipped(&self) -> usize {
        self.metadata_skipped
    }

    #[must_use]
    pub fn unclassified(&self) -> usize {
        self.unclassified
    }
}
