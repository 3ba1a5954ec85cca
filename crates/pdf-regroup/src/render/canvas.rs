//! Drawing primitives consumed by the sheet renderer

use crate::constants::*;
use crate::layout::Rect;
use crate::types::Result;
use image::RgbImage;

/// Stroke settings for outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Gray level, 0 = black, 1 = white
    pub gray: f32,
    /// Line width in points
    pub line_width: f32,
}

/// Fill settings for Helvetica text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    /// Gray level, 0 = black, 1 = white
    pub gray: f32,
}

pub const BORDER_STYLE: StrokeStyle = StrokeStyle {
    gray: BORDER_GRAY,
    line_width: BORDER_LINE_WIDTH,
};

pub const LABEL_STYLE: TextStyle = TextStyle {
    font_size: LABEL_FONT_SIZE,
    gray: TEXT_GRAY,
};

pub const TITLE_STYLE: TextStyle = TextStyle {
    font_size: TITLE_FONT_SIZE,
    gray: TEXT_GRAY,
};

/// An output surface that receives sheets one at a time.
///
/// Every sheet is opened with `new_page`, drawn, and closed with
/// `finish_sheet`. Coordinates are PDF points with a bottom-left origin.
pub trait SheetCanvas {
    fn new_page(&mut self, width_pt: f32, height_pt: f32) -> Result<()>;

    fn draw_rect(&mut self, rect: &Rect, style: &StrokeStyle) -> Result<()>;

    fn draw_text(&mut self, text: &str, origin: (f32, f32), style: &TextStyle) -> Result<()>;

    /// Draw `image` stretched to `rect`; callers fit the rect to the image first.
    fn draw_image(&mut self, image: &RgbImage, rect: &Rect) -> Result<()>;

    fn finish_sheet(&mut self) -> Result<()>;
}
