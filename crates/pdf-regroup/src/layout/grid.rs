//! Grid layout calculation
//!
//! This module handles the geometric layout of the cell grid on a sheet.
//! Rows are numbered from the top while PDF coordinates grow upward from
//! the bottom-left corner.

use super::{GridLayout, GridPosition, Rect};

// =============================================================================
// Grid Creation
// =============================================================================

/// Create a grid layout for a sheet.
///
/// # Arguments
/// * `rows` - Number of grid rows
/// * `cols` - Number of grid columns
/// * `sheet_width_pt` - Total output sheet width in points
/// * `sheet_height_pt` - Total output sheet height in points
/// * `margin_pt` - Uniform sheet margin in points
pub fn create_grid_layout(
    rows: usize,
    cols: usize,
    sheet_width_pt: f32,
    sheet_height_pt: f32,
    margin_pt: f32,
) -> GridLayout {
    let leaf_bounds = Rect::new(
        margin_pt,
        margin_pt,
        sheet_width_pt - 2.0 * margin_pt,
        sheet_height_pt - 2.0 * margin_pt,
    );

    GridLayout {
        rows,
        cols,
        cell_width_pt: leaf_bounds.width / cols.max(1) as f32,
        cell_height_pt: leaf_bounds.height / rows.max(1) as f32,
        sheet_width_pt,
        sheet_height_pt,
        leaf_bounds,
    }
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Calculate the bounds of a cell at the given grid position.
///
/// Row 0 is the top row, so its cell sits just below the top margin.
pub fn cell_bounds(grid: &GridLayout, pos: GridPosition) -> Rect {
    let cell_x = grid.leaf_bounds.x + pos.col as f32 * grid.cell_width_pt;
    let cell_y = grid.leaf_bounds.top() - (pos.row + 1) as f32 * grid.cell_height_pt;

    Rect::new(cell_x, cell_y, grid.cell_width_pt, grid.cell_height_pt)
}

/// Bounds of the cell holding slot `rank` (row-major order)
pub fn slot_bounds(grid: &GridLayout, rank: usize) -> Rect {
    cell_bounds(grid, GridPosition::from_rank(rank, grid.cols.max(1)))
}

// =============================================================================
// Tests
// =============================================================================
