use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegroupError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages in source document")]
    NoPages,
    /// Text extraction failed; group membership is unreliable from here on.
    #[error("Failed to read text from page {page}: {reason}")]
    Classification { page: usize, reason: String },
    /// Rasterizing or drawing a single cell failed.
    #[error("Failed to render page {page}: {reason}")]
    Render { page: usize, reason: String },
    #[error("Failed to append output sheet {sheet}: {reason}")]
    Assembly { sheet: usize, reason: String },
    #[error("{context}: {source}")]
    Batch {
        context: String,
        source: Box<RegroupError>,
    },
}

pub type Result<T> = std::result::Result<T, RegroupError>;

/// Group identifier read from a boundary marker
pub type GroupId = u32;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    Portrait,
    /// Landscape: width > height (default for regrouped sheets)
    #[default]
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w.min(h), w.max(h)),
            Orientation::Landscape => (w.max(h), w.min(h)),
        }
    }
}

/// Size class of a group, derived from its page count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupClass {
    /// Exactly one page
    Single,
    /// Exactly two pages
    Pair,
    /// Three or more pages; needs a supplemental sheet for its third page
    Extended,
}

impl GroupClass {
    pub fn from_len(len: usize) -> Self {
        match len {
            0 | 1 => GroupClass::Single,
            2 => GroupClass::Pair,
            _ => GroupClass::Extended,
        }
    }
}

/// Summary of a regrouping run (or a dry run)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegroupStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Pages assigned to some group
    pub grouped_pages: usize,
    /// Pages outside any group (before the first marker or after an unusable one)
    pub dropped_pages: usize,
    /// Number of distinct groups
    pub groups: usize,
    pub single_groups: usize,
    pub pair_groups: usize,
    pub extended_groups: usize,
    /// Ids of the groups that get a supplemental sheet
    pub extended_ids: Vec<GroupId>,
    /// Pages past the third rank of a group; these are never imposed
    pub unplaced_pages: usize,
    pub primary_batches: usize,
    pub supplemental_batches: usize,
    /// Output page count (front/back pairs, so always even)
    pub output_sheets: usize,
    /// Blank backs emitted for duplex pairing
    pub blank_sheets: usize,
}
