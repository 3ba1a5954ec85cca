pub mod assemble;
pub mod classify;
pub mod constants;
mod groups;
pub mod layout;
mod options;
mod regroup;
pub mod render;
pub mod source;
mod stats;
mod types;

pub use assemble::{OutputPlan, PlannedSheet, SheetPlan, assemble, plan_output};
pub use classify::{Marker, MarkerPattern, classify, group_markers};
pub use groups::{GroupIndex, GroupSummary};
pub use options::*;
pub use regroup::{RegroupReport, load_pdf, regroup, regroup_with, save_pdf};
pub use render::{PdfSheetWriter, SheetCanvas, StrokeStyle, TextStyle};
pub use source::{PageSource, PdfSource, RasterBackend};
pub use stats::calculate_statistics;
pub use types::*;
