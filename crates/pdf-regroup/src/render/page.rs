//! Sheet rendering
//!
//! Turns a computed [`SheetLayout`] into canvas calls. The page images of a
//! sheet are requested from the source in one call; each is dropped as soon
//! as its cell is drawn.

use crate::layout::{PlacedCell, SheetLayout, fit_image};
use crate::source::PageSource;
use crate::types::{RegroupError, Result};
use image::RgbImage;

use super::canvas::{BORDER_STYLE, LABEL_STYLE, SheetCanvas, TITLE_STYLE};

/// What happened while drawing one sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SheetOutcome {
    /// Cells whose page image was drawn
    pub images: usize,
    /// Cells drawn with border and label only, after a render failure
    pub skipped_images: usize,
}

// =============================================================================
// Public API
// =============================================================================

/// Draw a grid sheet.
///
/// A failure to rasterize or place one page only drops that cell's image;
/// the border and label are still drawn. Canvas failures while opening,
/// outlining or closing the sheet are returned.
pub fn draw_sheet<C, S>(
    canvas: &mut C,
    source: &S,
    layout: &SheetLayout,
    raster_scale: f32,
) -> Result<SheetOutcome>
where
    C: SheetCanvas + ?Sized,
    S: PageSource + ?Sized,
{
    canvas.new_page(layout.width_pt, layout.height_pt)?;

    if let Some(title) = &layout.title {
        canvas.draw_text(&title.text, title.origin, &TITLE_STYLE)?;
    }

    let pages: Vec<usize> = layout.cells.iter().map(|cell| cell.content.page).collect();
    let mut outcome = SheetOutcome::default();
    source.rasterize_pages(&pages, raster_scale, &mut |slot, image| {
        let cell = layout.cells.get(slot).ok_or_else(|| RegroupError::Render {
            page: pages.get(slot).copied().unwrap_or_default(),
            reason: format!("raster slot {} has no cell", slot),
        })?;
        canvas.draw_rect(&cell.bounds, &BORDER_STYLE)?;
        canvas.draw_text(&cell.label, cell.label_origin, &LABEL_STYLE)?;

        match image.and_then(|image| draw_cell_image(canvas, cell, &image)) {
            Ok(()) => outcome.images += 1,
            Err(e) => {
                log::warn!("Skipping image for {} (page {}): {}", cell.label, cell.content.page, e);
                outcome.skipped_images += 1;
            }
        }
        Ok(())
    })?;

    canvas.finish_sheet()?;
    Ok(outcome)
}

/// Emit a sheet with no marks at all
pub fn draw_blank<C>(canvas: &mut C, width_pt: f32, height_pt: f32) -> Result<()>
where
    C: SheetCanvas + ?Sized,
{
    canvas.new_page(width_pt, height_pt)?;
    canvas.finish_sheet()
}

// =============================================================================
// Helper Functions
// =============================================================================

fn draw_cell_image<C>(canvas: &mut C, cell: &PlacedCell, image: &RgbImage) -> Result<()>
where
    C: SheetCanvas + ?Sized,
{
    let placed = fit_image(&cell.image_area, image.width(), image.height());
    canvas.draw_image(image, &placed)
}
