//! Source document access
//!
//! The core reads source pages only through [`PageSource`]: text for
//! classification and a raster image for drawing. [`PdfSource`] implements it
//! on top of `lopdf`, with either embedded scan images or pdfium rendering
//! as the raster backend.

mod embedded;
#[cfg(feature = "pdfium")]
mod pdfium;

use crate::types::*;
use image::RgbImage;
use lopdf::{Document, ObjectId};

/// Read access to the pages of a source document
pub trait PageSource {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Extract the text of page `page` (0-based).
    ///
    /// Failures are reported as `RegroupError::Classification`.
    fn extract_text(&self, page: usize) -> Result<String>;

    /// Rasterize page `page` at `scale` times its native size.
    ///
    /// The returned buffer is owned by the caller and should be dropped as
    /// soon as it has been drawn. Failures are reported as
    /// `RegroupError::Render`.
    fn rasterize(&self, page: usize, scale: f32) -> Result<RgbImage>;

    /// Rasterize every page in `pages`, in order, handing each result to
    /// `sink` together with its position in `pages`.
    ///
    /// Sources with a per-document setup cost override this to pay it once
    /// per call. An error returned by `sink` stops the walk and is returned.
    fn rasterize_pages(
        &self,
        pages: &[usize],
        scale: f32,
        sink: &mut dyn FnMut(usize, Result<RgbImage>) -> Result<()>,
    ) -> Result<()> {
        rasterize_each(self, pages, scale, sink)
    }
}

fn rasterize_each<S>(
    source: &S,
    pages: &[usize],
    scale: f32,
    sink: &mut dyn FnMut(usize, Result<RgbImage>) -> Result<()>,
) -> Result<()>
where
    S: PageSource + ?Sized,
{
    for (slot, &page) in pages.iter().enumerate() {
        sink(slot, source.rasterize(page, scale))?;
    }
    Ok(())
}

/// How [`PdfSource`] turns a page into an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterBackend {
    /// Decode the largest image embedded in the page (scanned documents).
    /// The scale factor is not applied.
    Embedded,
    /// Render the page with pdfium
    #[cfg(feature = "pdfium")]
    Pdfium,
}

impl RasterBackend {
    /// Best backend available at runtime
    pub fn detect() -> Self {
        #[cfg(feature = "pdfium")]
        {
            match pdfium::init_pdfium() {
                Ok(_) => return RasterBackend::Pdfium,
                Err(e) => log::warn!(
                    "pdfium unavailable ({:?}), falling back to embedded page images",
                    e
                ),
            }
        }
        RasterBackend::Embedded
    }
}

/// A PDF loaded for regrouping
#[derive(Debug, Clone)]
pub struct PdfSource {
    document: Document,
    page_ids: Vec<ObjectId>,
    bytes: Option<Vec<u8>>,
    backend: RasterBackend,
}

impl PdfSource {
    /// Parse a PDF from memory, picking the best raster backend available
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let document = Document::load_mem(&bytes)?;
        let mut source = Self::from_document(document);
        source.bytes = Some(bytes);
        source.backend = RasterBackend::detect();
        Ok(source)
    }

    /// Wrap an already parsed document. Uses the embedded image backend.
    pub fn from_document(document: Document) -> Self {
        let page_ids = document.get_pages().values().copied().collect();
        Self {
            document,
            page_ids,
            bytes: None,
            backend: RasterBackend::Embedded,
        }
    }

    /// Switch raster backend
    pub fn with_backend(mut self, backend: RasterBackend) -> Result<Self> {
        #[cfg(feature = "pdfium")]
        let needs_bytes = backend == RasterBackend::Pdfium && self.bytes.is_none();
        #[cfg(not(feature = "pdfium"))]
        let needs_bytes = false;

        if needs_bytes {
            let mut document = self.document.clone();
            let mut bytes = Vec::new();
            document.save_to(&mut bytes)?;
            self.bytes = Some(bytes);
        }
        self.backend = backend;
        Ok(self)
    }

    pub fn backend(&self) -> RasterBackend {
        self.backend
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn page_id(&self, page: usize) -> Option<ObjectId> {
        self.page_ids.get(page).copied()
    }
}

impl PageSource for PdfSource {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn extract_text(&self, page: usize) -> Result<String> {
        if page >= self.page_ids.len() {
            return Err(RegroupError::Classification {
                page,
                reason: "page index out of range".to_string(),
            });
        }

        // lopdf numbers pages from 1
        self.document
            .extract_text(&[page as u32 + 1])
            .map_err(|e| RegroupError::Classification {
                page,
                reason: e.to_string(),
            })
    }

    fn rasterize(&self, page: usize, scale: f32) -> Result<RgbImage> {
        let page_id = self.page_id(page).ok_or_else(|| RegroupError::Render {
            page,
            reason: "page index out of range".to_string(),
        })?;

        let image = match self.backend {
            RasterBackend::Embedded => embedded::extract_page_image(&self.document, page_id, page),
            #[cfg(feature = "pdfium")]
            RasterBackend::Pdfium => {
                let bytes = self.bytes.as_deref().ok_or_else(|| RegroupError::Render {
                    page,
                    reason: "no document bytes for pdfium".to_string(),
                })?;
                pdfium::render_page(bytes, page, scale)
            }
        }?;

        log_raster(page, scale, &image);
        Ok(image)
    }

    fn rasterize_pages(
        &self,
        pages: &[usize],
        scale: f32,
        sink: &mut dyn FnMut(usize, Result<RgbImage>) -> Result<()>,
    ) -> Result<()> {
        match self.backend {
            RasterBackend::Embedded => rasterize_each(self, pages, scale, sink),
            #[cfg(feature = "pdfium")]
            RasterBackend::Pdfium => match self.bytes.as_deref() {
                Some(bytes) => pdfium::render_pages(bytes, pages, scale, &mut |slot, image| {
                    if let (Ok(image), Some(&page)) = (&image, pages.get(slot)) {
                        log_raster(page, scale, image);
                    }
                    sink(slot, image)
                }),
                None => rasterize_each(self, pages, scale, sink),
            },
        }
    }
}

fn log_raster(page: usize, scale: f32, image: &RgbImage) {
    log::debug!(
        "Rasterized page {} at {}x: {}x{}",
        page,
        scale,
        image.width(),
        image.height()
    );
}
