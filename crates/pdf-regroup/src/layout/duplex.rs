//! Duplex pairing
//!
//! The front of a sheet shows each group's first page in slot order. The back
//! shows second pages with every row reversed in place, so that after the
//! sheet is flipped each back cell sits behind its front cell:
//!
//! ```text
//! front  [0 1 2]    back  [2 1 0]
//!        [3 4 5]          [5 4 3]
//! ```

use crate::groups::GroupIndex;
use crate::types::GroupId;

use super::{Batch, CellAssignment, CellRef};

/// Rank of the page printed on the back side (second page of a group)
pub const BACK_RANK: usize = 1;

/// Slot permutation that reverses each row of `cols` slots independently.
///
/// Entry `i` is the slot shown at position `i`. A trailing partial row is
/// reversed within itself. The permutation is its own inverse.
pub fn mirror_row_order(len: usize, cols: usize) -> Vec<usize> {
    if cols == 0 {
        return (0..len).collect();
    }

    (0..len)
        .map(|i| {
            let row_start = i - i % cols;
            let row_end = (row_start + cols).min(len);
            row_start + (row_end - 1 - i)
        })
        .collect()
}

/// Reorder `slots` under [`mirror_row_order`]
pub fn mirror_rows<T: Clone>(slots: &[T], cols: usize) -> Vec<T> {
    mirror_row_order(slots.len(), cols)
        .into_iter()
        .map(|i| slots[i].clone())
        .collect()
}

fn resolve(slots: &[Option<GroupId>], index: &GroupIndex, rank: usize) -> CellAssignment {
    CellAssignment::new(
        slots
            .iter()
            .map(|slot| {
                slot.and_then(|group| {
                    index
                        .page_at_rank(group, rank)
                        .map(|page| CellRef { group, page, rank })
                })
            })
            .collect(),
    )
}

/// Cells for a front-side sheet: slot `i` shows the page at `rank` of the
/// group in slot `i`, or nothing if the group has no such page.
pub fn front_cells(batch: &Batch, index: &GroupIndex, rank: usize) -> CellAssignment {
    resolve(&batch.slots, index, rank)
}

/// Cells for the page at `rank` with the batch's rows mirrored
pub fn mirrored_cells(
    batch: &Batch,
    index: &GroupIndex,
    cols: usize,
    rank: usize,
) -> CellAssignment {
    resolve(&mirror_rows(&batch.slots, cols), index, rank)
}

/// Cells for the back side of a batch's sheet: second pages, rows mirrored
pub fn back_cells(batch: &Batch, index: &GroupIndex, cols: usize) -> CellAssignment {
    mirrored_cells(batch, index, cols, BACK_RANK)
}
