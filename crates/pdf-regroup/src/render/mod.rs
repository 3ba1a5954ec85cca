//! PDF rendering modules for regrouped sheets
//!
//! This module handles all drawing:
//! - The [`SheetCanvas`] drawing surface
//! - Turning sheet layouts into canvas calls
//! - Writing sheets into a `lopdf` document with embedded page images

mod canvas;
mod page;
mod writer;
mod xobject;

pub use canvas::*;
pub use page::*;
pub use writer::PdfSheetWriter;
pub use xobject::create_image_xobject;
