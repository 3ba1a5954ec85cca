//! Regrouping pipeline
//!
//! classify -> plan batches -> pair sides -> lay out -> draw, strictly in that
//! order. The synchronous core works on any [`PageSource`] and
//! [`SheetCanvas`]; the async entry points run it on a blocking thread.

use crate::assemble::{OutputPlan, SheetPlan, plan_output};
use crate::classify::classify;
use crate::options::RegroupOptions;
use crate::render::{PdfSheetWriter, SheetCanvas, draw_blank, draw_sheet};
use crate::source::{PageSource, PdfSource};
use crate::stats::statistics_for;
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Outcome of a regrouping run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegroupReport {
    pub statistics: RegroupStatistics,
    /// Cells drawn with their page image
    pub images_drawn: usize,
    /// Cells left without an image after a render failure
    pub images_skipped: usize,
}

// =============================================================================
// Public API
// =============================================================================

/// Run the full pipeline from `source` onto `canvas`.
///
/// Classification and assembly failures abort the run; the error carries the
/// batch in which it happened. Per-page render failures are logged and only
/// cost that cell its image.
pub fn regroup_with<S, C>(
    source: &S,
    canvas: &mut C,
    options: &RegroupOptions,
) -> Result<RegroupReport>
where
    S: PageSource + ?Sized,
    C: SheetCanvas + ?Sized,
{
    options.validate()?;

    let page_count = source.page_count();
    if page_count == 0 {
        return Err(RegroupError::NoPages);
    }

    let marker = options.marker()?;
    let index = classify(source, &marker)?;
    let summary = index.summary();
    log::info!(
        "Found {} group(s) in {} page(s): {} single, {} pair, {} with 3+ pages {:?}",
        index.len(),
        page_count,
        summary.single,
        summary.pair,
        summary.extended,
        index.ids_with_class(GroupClass::Extended)
    );

    if index.is_empty() {
        log::warn!(
            "No page matched marker pattern '{}', output will be empty",
            marker.as_str()
        );
    }
    if index.unplaced_page_count() > 0 {
        log::warn!(
            "{} page(s) beyond the third page of their group will not be placed",
            index.unplaced_page_count()
        );
    }

    let plan = plan_output(&index, options);
    let mut report = RegroupReport {
        statistics: statistics_for(page_count, &index, &plan),
        ..Default::default()
    };

    draw_plan(source, canvas, &plan, options.raster_scale, &mut report)?;

    log::info!(
        "Wrote {} sheet(s), {} blank",
        report.statistics.output_sheets,
        report.statistics.blank_sheets
    );
    Ok(report)
}

/// Regroup a loaded PDF into a new document
pub async fn regroup(source: PdfSource, options: &RegroupOptions) -> Result<(Document, RegroupReport)> {
    let options = options.clone();
    tokio::task::spawn_blocking(move || {
        let mut writer = PdfSheetWriter::new();
        let report = regroup_with(&source, &mut writer, &options)?;
        Ok((writer.finish(), report))
    })
    .await?
}

/// Load a source PDF
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<PdfSource> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let source = tokio::task::spawn_blocking(move || PdfSource::from_bytes(bytes)).await??;
    log::debug!("Loaded {} ({} pages)", path.display(), source.page_count());
    Ok(source)
}

/// Save the regrouped document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, RegroupError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

// =============================================================================
// Helper Functions
// =============================================================================

fn draw_plan<S, C>(
    source: &S,
    canvas: &mut C,
    plan: &OutputPlan,
    raster_scale: f32,
    report: &mut RegroupReport,
) -> Result<()>
where
    S: PageSource + ?Sized,
    C: SheetCanvas + ?Sized,
{
    let (width_pt, height_pt) = (plan.grid.sheet_width_pt, plan.grid.sheet_height_pt);

    for sheet in &plan.sheets {
        let drawn = match &sheet.plan {
            SheetPlan::Grid(layout) => {
                draw_sheet(canvas, source, layout, raster_scale).map(|outcome| {
                    report.images_drawn += outcome.images;
                    report.images_skipped += outcome.skipped_images;
                })
            }
            SheetPlan::Blank => draw_blank(canvas, width_pt, height_pt),
        };

        drawn.map_err(|e| RegroupError::Batch {
            context: sheet.context.clone(),
            source: Box::new(e),
        })?;
    }

    Ok(())
}
