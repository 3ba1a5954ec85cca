//! Batch planning
//!
//! Sorted group ids are chunked into fixed-size batches, one group per grid
//! slot. The last batch is padded with empty slots. Groups with three or more
//! pages additionally get a supplemental batch sequence for their third page.

use crate::groups::GroupIndex;
use crate::types::{GroupClass, GroupId};

/// A fixed-capacity window of group slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 1-based position in its batch sequence
    pub number: usize,
    /// Exactly `capacity` slots; `None` is an empty slot
    pub slots: Vec<Option<GroupId>>,
}

impl Batch {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Group ids in the batch, in slot order, without empty slots
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.slots.iter().flatten().copied().collect()
    }
}

/// Chunk `sorted_ids` into batches of exactly `capacity` slots.
///
/// Produces `ceil(ids / capacity)` batches; a zero capacity yields none.
pub fn plan_primary(sorted_ids: &[GroupId], capacity: usize) -> Vec<Batch> {
    if capacity == 0 {
        return Vec::new();
    }

    sorted_ids
        .chunks(capacity)
        .enumerate()
        .map(|(i, chunk)| {
            let mut slots: Vec<Option<GroupId>> = chunk.iter().copied().map(Some).collect();
            slots.resize(capacity, None);
            Batch {
                number: i + 1,
                slots,
            }
        })
        .collect()
}

/// Batches for the third pages of extended groups.
///
/// Keeps only ids whose class is `Extended`, in their given order, then
/// chunks them like [`plan_primary`]. No extended groups means no batches.
pub fn plan_supplemental(sorted_ids: &[GroupId], index: &GroupIndex, capacity: usize) -> Vec<Batch> {
    let extended: Vec<GroupId> = sorted_ids
        .iter()
        .copied()
        .filter(|&id| index.class(id) == Some(GroupClass::Extended))
        .collect();

    plan_primary(&extended, capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_batch_count_and_padding() {
        let ids: Vec<GroupId> = (1..=7).collect();
        let batches = plan_primary(&ids, 6);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].group_ids(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            batches[1].slots,
            vec![Some(7), None, None, None, None, None]
        );
        assert!(batches.iter().all(|b| b.capacity() == 6));
        assert_eq!(batches[1].number, 2);
    }

    #[test]
    fn test_primary_concatenation_reproduces_ids() {
        for n in 0..20u32 {
            let ids: Vec<GroupId> = (1..=n).map(|i| i * 3).collect();
            for capacity in 1..8 {
                let batches = plan_primary(&ids, capacity);
                assert_eq!(batches.len(), ids.len().div_ceil(capacity));
                let flat: Vec<GroupId> = batches.iter().flat_map(Batch::group_ids).collect();
                assert_eq!(flat, ids);
            }
        }
    }

    #[test]
    fn test_zero_capacity() {
        assert!(plan_primary(&[1, 2], 0).is_empty());
    }

    #[test]
    fn test_supplemental_filters_extended() {
        let index = GroupIndex::from_groups(vec![
            (1, vec![0]),
            (2, vec![1, 2, 3]),
            (3, vec![4, 5]),
            (4, vec![6, 7, 8, 9]),
        ]);
        let batches = plan_supplemental(&index.sorted_ids(), &index, 6);

        assert_eq!(batches.len(), 1);
        assert_eq!(
            batches[0].slots,
            vec![Some(2), Some(4), None, None, None, None]
        );
    }

    #[test]
    fn test_supplemental_empty_without_extended_groups() {
        let index = GroupIndex::from_groups(vec![(1, vec![0]), (2, vec![1, 2])]);
        assert!(plan_supplemental(&index.sorted_ids(), &index, 6).is_empty());
    }
}
