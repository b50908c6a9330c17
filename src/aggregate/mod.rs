//! Group records by section into chronological histories.

use std::collections::HashMap;

use crate::domain::PriceRecord;

/// Records for one section, ascending by term index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroup {
    pub section: String,
    pub records: Vec<PriceRecord>,
}

impl SectionGroup {
    /// Number of records that share a term with an earlier record.
    pub fn duplicate_terms(&self) -> usize {
        self.records
            .windows(2)
            .filter(|w| w[0].term_index == w[1].term_index)
            .count()
    }
}

/// Group records by exact section string.
///
/// Groups come out in first-seen order. Within a group the sort by term index
/// is stable, so same-term records keep insertion order; they are not
/// deduplicated.
pub fn aggregate(records: Vec<PriceRecord>) -> Vec<SectionGroup> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<SectionGroup> = Vec::new();

    for record in records {
        match slots.get(&record.section).copied() {
            Some(slot) => groups[slot].records.push(record),
            None => {
                slots.insert(record.section.clone(), groups.len());
                groups.push(SectionGroup {
                    section: record.section.clone(),
                    records: vec![record],
                });
            }
        }
    }

    for group in &mut groups {
        group.records.sort_by_key(|r| r.term_index);
    }

    groups
}
