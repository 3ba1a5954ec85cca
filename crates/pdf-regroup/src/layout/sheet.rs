//! Sheet composition: cell assignment to drawable geometry

use super::{
    CellAssignment, GridLayout, GridPosition, PlacedCell, SheetLayout, SheetTitle, cell_bounds,
    image_area, label_origin, title_origin,
};

/// Compute the geometry of one grid sheet.
///
/// Slots beyond the grid's cell count are ignored. Empty slots produce no
/// cell at all, so a fully empty assignment yields a sheet without content.
pub fn compose_sheet(
    cells: &CellAssignment,
    grid: &GridLayout,
    title: Option<&str>,
) -> SheetLayout {
    let cols = grid.cols.max(1);

    let placed = cells
        .cells
        .iter()
        .take(grid.cell_count())
        .enumerate()
        .filter_map(|(slot, cell)| {
            let content = (*cell)?;
            let position = GridPosition::from_rank(slot, cols);
            let bounds = cell_bounds(grid, position);
            Some(PlacedCell {
                slot,
                position,
                content,
                bounds,
                label: content.label(),
                label_origin: label_origin(&bounds),
                image_area: image_area(&bounds),
            })
        })
        .collect();

    SheetLayout {
        width_pt: grid.sheet_width_pt,
        height_pt: grid.sheet_height_pt,
        cells: placed,
        title: title.filter(|t| !t.is_empty()).map(|text| SheetTitle {
            text: text.to_string(),
            origin: title_origin(grid),
        }),
    }
}
