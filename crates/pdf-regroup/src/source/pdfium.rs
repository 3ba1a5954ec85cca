//! Page rasterization through pdfium

use crate::types::{RegroupError, Result};
use image::{DynamicImage, RgbImage, RgbaImage};
use pdfium_render::prelude::*;

/// Initialize Pdfium, trying the vendored library first, then falling back to system
pub(crate) fn init_pdfium() -> std::result::Result<Pdfium, PdfiumError> {
    // Try to load from vendor directory (relative to the working directory)
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// Render one page of an in-memory PDF to an RGB buffer.
///
/// The pdfium document lives only for the duration of this call.
pub(crate) fn render_page(bytes: &[u8], page: usize, scale: f32) -> Result<RgbImage> {
    let render_err = |e: PdfiumError| RegroupError::Render {
        page,
        reason: format!("{:?}", e),
    };

    let pdfium = init_pdfium().map_err(render_err)?;
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(render_err)?;
    let config = PdfRenderConfig::new().scale_page_by_factor(scale);

    render_loaded(&document, page, &config)
}

/// Render several pages of an in-memory PDF, binding pdfium and parsing the
/// document once.
///
/// If the document cannot be opened, every page is reported to `sink` as a
/// render failure.
pub(crate) fn render_pages(
    bytes: &[u8],
    pages: &[usize],
    scale: f32,
    sink: &mut dyn FnMut(usize, Result<RgbImage>) -> Result<()>,
) -> Result<()> {
    let pdfium = match init_pdfium() {
        Ok(pdfium) => pdfium,
        Err(e) => return fail_all(pages, &format!("{:?}", e), sink),
    };
    let document = match pdfium.load_pdf_from_byte_slice(bytes, None) {
        Ok(document) => document,
        Err(e) => return fail_all(pages, &format!("{:?}", e), sink),
    };

    let config = PdfRenderConfig::new().scale_page_by_factor(scale);
    for (slot, &page) in pages.iter().enumerate() {
        sink(slot, render_loaded(&document, page, &config))?;
    }
    Ok(())
}

fn render_loaded(document: &PdfDocument, page: usize, config: &PdfRenderConfig) -> Result<RgbImage> {
    let render_err = |e: PdfiumError| RegroupError::Render {
        page,
        reason: format!("{:?}", e),
    };

    let page_index = u16::try_from(page).map_err(|_| RegroupError::Render {
        page,
        reason: "page index exceeds pdfium limit".to_string(),
    })?;

    let pdf_page = document.pages().get(page_index).map_err(render_err)?;
    let bitmap = pdf_page.render_with_config(config).map_err(render_err)?;

    let width = bitmap.width() as u32;
    let height = bitmap.height() as u32;
    let rgba = bitmap.as_rgba_bytes().to_vec();

    let image = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| RegroupError::Render {
        page,
        reason: "pdfium returned a malformed bitmap".to_string(),
    })?;

    Ok(DynamicImage::ImageRgba8(image).to_rgb8())
}

fn fail_all(
    pages: &[usize],
    reason: &str,
    sink: &mut dyn FnMut(usize, Result<RgbImage>) -> Result<()>,
) -> Result<()> {
    log::warn!("pdfium could not open the source document: {}", reason);
    for (slot, &page) in pages.iter().enumerate() {
        sink(
            slot,
            Err(RegroupError::Render {
                page,
                reason: reason.to_string(),
            }),
        )?;
    }
    Ok(())
}
