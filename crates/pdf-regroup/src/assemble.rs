//! Sheet assembly
//!
//! Orders the output sheets: for every primary batch a front sheet and either
//! its mirrored back or a blank, then for every supplemental batch a
//! third-page sheet followed by a blank. Output therefore always comes in
//! front/back pairs.

use crate::constants::SUPPLEMENTAL_RANK;
use crate::groups::GroupIndex;
use crate::layout::{
    Batch, GridLayout, SheetLayout, back_cells, compose_sheet, create_grid_layout, front_cells,
    plan_primary, plan_supplemental,
};
use crate::options::RegroupOptions;

/// One output sheet, before drawing
#[derive(Debug, Clone, PartialEq)]
pub enum SheetPlan {
    /// A grid of page cells
    Grid(SheetLayout),
    /// A sheet with no marks, keeping the duplex pairing intact
    Blank,
}

impl SheetPlan {
    pub fn is_blank(&self) -> bool {
        matches!(self, SheetPlan::Blank)
    }
}

/// A planned sheet together with the batch it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSheet {
    /// Human readable batch description for logs and errors
    pub context: String,
    pub plan: SheetPlan,
}

/// Everything needed to draw the output document
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPlan {
    pub grid: GridLayout,
    pub primary: Vec<Batch>,
    pub supplemental: Vec<Batch>,
    pub sheets: Vec<PlannedSheet>,
}

impl OutputPlan {
    pub fn blank_count(&self) -> usize {
        self.sheets.iter().filter(|s| s.plan.is_blank()).count()
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Plan batches and sheets for a classified document.
///
/// Options are expected to be validated.
pub fn plan_output(index: &GroupIndex, options: &RegroupOptions) -> OutputPlan {
    let (sheet_width, sheet_height) = options.sheet_size_pt();
    let grid = create_grid_layout(
        options.grid_rows,
        options.grid_cols,
        sheet_width,
        sheet_height,
        options.margin_pt(),
    );

    let ids = index.sorted_ids();
    let primary = plan_primary(&ids, options.batch_capacity);
    let supplemental = plan_supplemental(&ids, index, options.batch_capacity);

    let sheets = assemble(&primary, &supplemental, index, &grid, options.add_titles);

    OutputPlan {
        grid,
        primary,
        supplemental,
        sheets,
    }
}

/// Build the ordered sheet sequence for the given batches.
pub fn assemble(
    primary: &[Batch],
    supplemental: &[Batch],
    index: &GroupIndex,
    grid: &GridLayout,
    add_titles: bool,
) -> Vec<PlannedSheet> {
    let mut sheets = Vec::with_capacity(2 * (primary.len() + supplemental.len()));

    for batch in primary {
        let context = format!("batch {} (groups {:?})", batch.number, batch.group_ids());
        log::info!("Processing {}", context);

        let front_title = format!("Batch {} - First Pages", batch.number);
        let front = compose_sheet(
            &front_cells(batch, index, 0),
            grid,
            add_titles.then_some(front_title.as_str()),
        );

        let back_assignment = back_cells(batch, index, grid.cols);
        let back = if back_assignment.has_content() {
            let back_title = format!("Batch {} - Second Pages", batch.number);
            SheetPlan::Grid(compose_sheet(
                &back_assignment,
                grid,
                add_titles.then_some(back_title.as_str()),
            ))
        } else {
            log::debug!("Batch {} has no second pages, back left blank", batch.number);
            SheetPlan::Blank
        };

        sheets.push(PlannedSheet {
            context: context.clone(),
            plan: SheetPlan::Grid(front),
        });
        sheets.push(PlannedSheet {
            context,
            plan: back,
        });
    }

    for batch in supplemental {
        let ids = batch.group_ids();
        let context = format!("supplemental batch {} (groups {:?})", batch.number, ids);
        log::info!("Processing {}", context);

        let title = format!("Third Pages - Groups {:?}", ids);
        let sheet = compose_sheet(
            &front_cells(batch, index, SUPPLEMENTAL_RANK),
            grid,
            add_titles.then_some(title.as_str()),
        );

        sheets.push(PlannedSheet {
            context: context.clone(),
            plan: SheetPlan::Grid(sheet),
        });
        sheets.push(PlannedSheet {
            context,
            plan: SheetPlan::Blank,
        });
    }

    sheets
}
