//! Shared constants for regrouping and sheet drawing
//!
//! This module centralizes magic numbers used by the layout engine and
//! the sheet renderer.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Defaults
// =============================================================================

/// Boundary marker: the token "TEZA" followed by the group number
pub const DEFAULT_MARKER_PATTERN: &str = r"TEZA\s*(\d+)";

/// Grid rows per sheet
pub const DEFAULT_GRID_ROWS: usize = 2;

/// Grid columns per sheet
pub const DEFAULT_GRID_COLS: usize = 3;

/// Group slots per batch (one per grid cell)
pub const DEFAULT_BATCH_CAPACITY: usize = 6;

/// Sheet margin on all sides
pub const DEFAULT_MARGIN_MM: f32 = 10.0;

/// Rasterization scale relative to the source page's native size
pub const DEFAULT_RASTER_SCALE: f32 = 2.0;

/// Rank of the page shown on supplemental sheets (third page of a group)
pub const SUPPLEMENTAL_RANK: usize = 2;

// =============================================================================
// Cell Drawing
// =============================================================================

/// Gray level of cell borders
pub const BORDER_GRAY: f32 = 0.5;

/// Line width of cell borders (points)
pub const BORDER_LINE_WIDTH: f32 = 0.5;

/// Height of the label band at the top of each cell (points)
pub const LABEL_HEIGHT: f32 = 8.0;

/// Label font size (points)
pub const LABEL_FONT_SIZE: f32 = 5.0;

/// Offset of the label text from the cell's left edge and from the label band
pub const LABEL_INSET: f32 = 2.0;

/// Inset of the page image from the cell border (points)
pub const IMAGE_INSET: f32 = 1.0;

/// Gray level of labels and titles
pub const TEXT_GRAY: f32 = 0.7;

// =============================================================================
// Titles
// =============================================================================

/// Title font size (points)
pub const TITLE_FONT_SIZE: f32 = 6.0;

/// Distance of the title baseline from the top edge of the sheet (points)
pub const TITLE_TOP_OFFSET: f32 = 10.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_pt_round_trip() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 0.001);
        assert!((pt_to_mm(mm_to_pt(10.0)) - 10.0).abs() < 0.001);
    }
}
