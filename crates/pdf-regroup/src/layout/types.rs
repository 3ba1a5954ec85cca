//! Layout data types for regrouping
//!
//! These types represent the intermediate results between batch planning
//! and PDF rendering.

use crate::types::GroupId;

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major position of a slot rank
    pub fn from_rank(rank: usize, cols: usize) -> Self {
        Self {
            row: rank / cols,
            col: rank % cols,
        }
    }
}

/// A rectangular area in points (bottom-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Check whether `other` lies within this rectangle (with a small tolerance)
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 0.01;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.top() <= self.top() + EPS
    }
}

/// Grid geometry of one output sheet
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Number of rows in the grid
    pub rows: usize,
    /// Number of columns in the grid
    pub cols: usize,
    /// Width of each cell in points
    pub cell_width_pt: f32,
    /// Height of each cell in points
    pub cell_height_pt: f32,
    /// Full sheet width in points
    pub sheet_width_pt: f32,
    /// Full sheet height in points
    pub sheet_height_pt: f32,
    /// Area inside the sheet margins
    pub leaf_bounds: Rect,
}

impl GridLayout {
    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    pub fn margin_pt(&self) -> f32 {
        self.leaf_bounds.x
    }
}

/// One source page placed in a grid slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub group: GroupId,
    /// Source page index
    pub page: usize,
    /// Rank of the page within its group (0 = first page)
    pub rank: usize,
}

impl CellRef {
    /// Cell label, e.g. `E12-P2` for the second page of group 12
    pub fn label(&self) -> String {
        format!("E{}-P{}", self.group, self.rank + 1)
    }
}

/// Grid slot to source page mapping for one sheet side.
///
/// Index `i` is the slot's rank in row-major order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellAssignment {
    pub cells: Vec<Option<CellRef>>,
}

impl CellAssignment {
    pub fn new(cells: Vec<Option<CellRef>>) -> Self {
        Self { cells }
    }

    /// True if at least one slot resolves to a page
    pub fn has_content(&self) -> bool {
        self.cells.iter().any(Option::is_some)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Group id in each slot (None for empty slots)
    pub fn groups(&self) -> Vec<Option<GroupId>> {
        self.cells.iter().map(|c| c.map(|c| c.group)).collect()
    }
}

/// A populated cell, with everything needed to draw it
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    /// Slot rank within the grid
    pub slot: usize,
    pub position: GridPosition,
    pub content: CellRef,
    /// Full cell rectangle; the border is drawn along it
    pub bounds: Rect,
    pub label: String,
    /// Baseline origin of the label text
    pub label_origin: (f32, f32),
    /// Area the page image is fitted into
    pub image_area: Rect,
}

/// Informational caption at the top-left of a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTitle {
    pub text: String,
    pub origin: (f32, f32),
}

/// Fully computed geometry of one grid sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub width_pt: f32,
    pub height_pt: f32,
    /// Populated cells only, in slot order
    pub cells: Vec<PlacedCell>,
    pub title: Option<SheetTitle>,
}

impl SheetLayout {
    /// True if at least one cell is populated
    pub fn has_content(&self) -> bool {
        !self.cells.is_empty()
    }
}
