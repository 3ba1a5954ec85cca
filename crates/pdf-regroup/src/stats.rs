use crate::assemble::{OutputPlan, plan_output};
use crate::classify::classify;
use crate::groups::GroupIndex;
use crate::options::RegroupOptions;
use crate::source::PageSource;
use crate::types::*;

/// Calculate statistics for a regrouping run without drawing anything.
///
/// Reads page text to classify the document, then plans batches and sheets.
pub fn calculate_statistics<S>(source: &S, options: &RegroupOptions) -> Result<RegroupStatistics>
where
    S: PageSource + ?Sized,
{
    options.validate()?;

    let source_pages = source.page_count();
    if source_pages == 0 {
        return Err(RegroupError::NoPages);
    }

    let index = classify(source, &options.marker()?)?;
    let plan = plan_output(&index, options);
    Ok(statistics_for(source_pages, &index, &plan))
}

/// Summarize a classified and planned document
pub(crate) fn statistics_for(
    source_pages: usize,
    index: &GroupIndex,
    plan: &OutputPlan,
) -> RegroupStatistics {
    let summary = index.summary();

    RegroupStatistics {
        source_pages,
        grouped_pages: index.grouped_page_count(),
        dropped_pages: index.dropped_pages().len(),
        groups: index.len(),
        single_groups: summary.single,
        pair_groups: summary.pair,
        extended_groups: summary.extended,
        extended_ids: index.ids_with_class(GroupClass::Extended),
        unplaced_pages: index.unplaced_page_count(),
        primary_batches: plan.primary.len(),
        supplemental_batches: plan.supplemental.len(),
        output_sheets: plan.sheets.len(),
        blank_sheets: plan.blank_count(),
    }
}
