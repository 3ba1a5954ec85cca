use crate::classify::MarkerPattern;
use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Regrouping configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegroupOptions {
    // Output sheet
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub margin_mm: f32,

    // Grid
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub batch_capacity: usize,

    // Classification
    pub marker_pattern: String,

    // Rendering
    pub raster_scale: f32,
    pub add_titles: bool,
}

impl Default for RegroupOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Landscape,
            margin_mm: DEFAULT_MARGIN_MM,
            grid_rows: DEFAULT_GRID_ROWS,
            grid_cols: DEFAULT_GRID_COLS,
            batch_capacity: DEFAULT_BATCH_CAPACITY,
            marker_pattern: DEFAULT_MARKER_PATTERN.to_string(),
            raster_scale: DEFAULT_RASTER_SCALE,
            add_titles: true,
        }
    }
}

impl RegroupOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| RegroupError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RegroupError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Output sheet size in points, orientation applied
    pub fn sheet_size_pt(&self) -> (f32, f32) {
        let (w, h) = self.paper_size.dimensions_with_orientation(self.orientation);
        (mm_to_pt(w), mm_to_pt(h))
    }

    pub fn margin_pt(&self) -> f32 {
        mm_to_pt(self.margin_mm)
    }

    /// Compile the configured boundary marker
    pub fn marker(&self) -> Result<MarkerPattern> {
        MarkerPattern::new(&self.marker_pattern)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(RegroupError::Config(
                "Grid must have at least one row and one column".to_string(),
            ));
        }

        if self.batch_capacity == 0 {
            return Err(RegroupError::Config(
                "Batch capacity must be at least 1".to_string(),
            ));
        }

        let cells = self.grid_rows * self.grid_cols;
        if self.batch_capacity > cells {
            return Err(RegroupError::Config(format!(
                "Batch capacity {} exceeds the {}x{} grid ({} cells)",
                self.batch_capacity, self.grid_rows, self.grid_cols, cells
            )));
        }

        // The back side is mirrored row by row, so batches must fill whole rows
        if self.batch_capacity % self.grid_cols != 0 {
            return Err(RegroupError::Config(format!(
                "Batch capacity {} must be a multiple of the column count {}",
                self.batch_capacity, self.grid_cols
            )));
        }

        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(RegroupError::Config(
                "Margin must be a non-negative number".to_string(),
            ));
        }

        let (width_pt, height_pt) = self.sheet_size_pt();
        let margin_pt = self.margin_pt();
        if width_pt - 2.0 * margin_pt <= 0.0 || height_pt - 2.0 * margin_pt <= 0.0 {
            return Err(RegroupError::Config(format!(
                "Margin of {}mm leaves no printable area on the sheet",
                self.margin_mm
            )));
        }

        if !(self.raster_scale.is_finite() && self.raster_scale > 0.0) {
            return Err(RegroupError::Config(
                "Raster scale must be greater than zero".to_string(),
            ));
        }

        self.marker()?;

        Ok(())
    }
}
