//! Group index: group id to ordered source page indices

use crate::types::{GroupClass, GroupId};
use std::collections::BTreeMap;

/// Read-only view of the groups found in a source document.
///
/// Every group owns at least one page. The first page of a group is the page
/// where its marker was detected; later pages follow in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupIndex {
    groups: BTreeMap<GroupId, Vec<usize>>,
    dropped_pages: Vec<usize>,
}

/// Number of groups per size class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupSummary {
    pub single: usize,
    pub pair: usize,
    pub extended: usize,
}

impl GroupIndex {
    /// Build an index from `(id, pages)` entries.
    ///
    /// Entries sharing an id are concatenated in iteration order and empty
    /// page lists are ignored.
    pub fn from_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (GroupId, Vec<usize>)>,
    {
        let mut map: BTreeMap<GroupId, Vec<usize>> = BTreeMap::new();
        for (id, pages) in groups {
            if !pages.is_empty() {
                map.entry(id).or_default().extend(pages);
            }
        }
        Self {
            groups: map,
            dropped_pages: Vec::new(),
        }
    }

    pub(crate) fn with_dropped_pages(
        groups: BTreeMap<GroupId, Vec<usize>>,
        dropped_pages: Vec<usize>,
    ) -> Self {
        Self {
            groups,
            dropped_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Group ids in ascending order
    pub fn sorted_ids(&self) -> Vec<GroupId> {
        self.groups.keys().copied().collect()
    }

    /// Source pages of a group, in source order
    pub fn pages(&self, id: GroupId) -> Option<&[usize]> {
        self.groups.get(&id).map(Vec::as_slice)
    }

    pub fn class(&self, id: GroupId) -> Option<GroupClass> {
        self.groups.get(&id).map(|pages| GroupClass::from_len(pages.len()))
    }

    /// Source page at `rank` within a group (0 = first page)
    pub fn page_at_rank(&self, id: GroupId, rank: usize) -> Option<usize> {
        self.groups.get(&id).and_then(|pages| pages.get(rank).copied())
    }

    /// Ids of all groups of the given class, ascending
    pub fn ids_with_class(&self, class: GroupClass) -> Vec<GroupId> {
        self.groups
            .iter()
            .filter(|(_, pages)| GroupClass::from_len(pages.len()) == class)
            .map(|(&id, _)| id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &[usize])> {
        self.groups.iter().map(|(&id, pages)| (id, pages.as_slice()))
    }

    /// Pages that belong to no group
    pub fn dropped_pages(&self) -> &[usize] {
        &self.dropped_pages
    }

    /// Total pages assigned to any group
    pub fn grouped_page_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Pages at rank 3 and beyond, which no sheet shows
    pub fn unplaced_page_count(&self) -> usize {
        self.groups
            .values()
            .map(|pages| pages.len().saturating_sub(3))
            .sum()
    }

    pub fn summary(&self) -> GroupSummary {
        let mut summary = GroupSummary::default();
        for pages in self.groups.values() {
            match GroupClass::from_len(pages.len()) {
                GroupClass::Single => summary.single += 1,
                GroupClass::Pair => summary.pair += 1,
                GroupClass::Extended => summary.extended += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GroupIndex {
        GroupIndex::from_groups(vec![
            (5, vec![0]),
            (2, vec![1, 2]),
            (9, vec![3, 4, 5, 6]),
        ])
    }

    #[test]
    fn test_sorted_ids_ascending() {
        let index = sample();
        assert_eq!(index.sorted_ids(), vec![2, 5, 9]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_class_from_length() {
        let index = sample();
        assert_eq!(index.class(5), Some(GroupClass::Single));
        assert_eq!(index.class(2), Some(GroupClass::Pair));
        assert_eq!(index.class(9), Some(GroupClass::Extended));
        assert_eq!(index.class(42), None);
    }

    #[test]
    fn test_page_at_rank() {
        let index = sample();
        assert_eq!(index.page_at_rank(2, 0), Some(1));
        assert_eq!(index.page_at_rank(2, 1), Some(2));
        assert_eq!(index.page_at_rank(2, 2), None);
        assert_eq!(index.page_at_rank(7, 0), None);
    }

    #[test]
    fn test_repeated_ids_extend() {
        let index = GroupIndex::from_groups(vec![(1, vec![0]), (2, vec![1]), (1, vec![2, 3])]);
        assert_eq!(index.pages(1), Some(&[0, 2, 3][..]));
    }

    #[test]
    fn test_empty_groups_ignored() {
        let index = GroupIndex::from_groups(vec![(1, vec![])]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_summary_and_counts() {
        let index = sample();
        assert_eq!(
            index.summary(),
            GroupSummary {
                single: 1,
                pair: 1,
                extended: 1
            }
        );
        assert_eq!(index.grouped_page_count(), 7);
        assert_eq!(index.unplaced_page_count(), 1);
        assert_eq!(index.ids_with_class(GroupClass::Extended), vec![9]);
    }
}
