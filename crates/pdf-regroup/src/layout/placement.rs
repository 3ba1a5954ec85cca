//! Content placement within cells
//!
//! Each populated cell has a thin label band along its top edge and the
//! page image below it. The image keeps its aspect ratio.

use crate::constants::{IMAGE_INSET, LABEL_HEIGHT, LABEL_INSET, TITLE_TOP_OFFSET};

use super::{GridLayout, Rect};

/// Baseline origin of the label text for a cell
pub fn label_origin(cell: &Rect) -> (f32, f32) {
    (
        cell.x + LABEL_INSET,
        cell.top() - LABEL_HEIGHT + LABEL_INSET,
    )
}

/// Area available for the page image: the cell minus the label band and
/// a one-point inset from the border.
pub fn image_area(cell: &Rect) -> Rect {
    Rect::new(
        cell.x + IMAGE_INSET,
        cell.y + IMAGE_INSET,
        (cell.width - 2.0 * IMAGE_INSET).max(0.0),
        (cell.height - LABEL_HEIGHT - 2.0 * IMAGE_INSET).max(0.0),
    )
}

/// Baseline origin of the sheet title
pub fn title_origin(grid: &GridLayout) -> (f32, f32) {
    (grid.margin_pt(), grid.sheet_height_pt - TITLE_TOP_OFFSET)
}

/// Fit an image of `image_width` x `image_height` pixels into `area`,
/// preserving aspect ratio. The result is centred in the area.
///
/// Degenerate images collapse to a zero-sized rect at the area's centre.
pub fn fit_image(area: &Rect, image_width: u32, image_height: u32) -> Rect {
    if image_width == 0 || image_height == 0 || area.width <= 0.0 || area.height <= 0.0 {
        return Rect::new(
            area.x + area.width / 2.0,
            area.y + area.height / 2.0,
            0.0,
            0.0,
        );
    }

    let scale = calculate_fit_scale(
        image_width as f32,
        image_height as f32,
        area.width,
        area.height,
    );

    let width = image_width as f32 * scale;
    let height = image_height as f32 * scale;

    Rect::new(
        area.x + (area.width - width) / 2.0,
        area.y + (area.height - height) / 2.0,
        width,
        height,
    )
}

/// Largest scale factor that fits the source inside the target.
fn calculate_fit_scale(src_width: f32, src_height: f32, target_width: f32, target_height: f32) -> f32 {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h)
}
