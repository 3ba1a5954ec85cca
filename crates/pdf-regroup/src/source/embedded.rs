//! Page images from embedded scan data
//!
//! Scanned documents usually carry one image XObject per page. This backend
//! decodes the largest one instead of rendering the page.

use crate::types::{RegroupError, Result};
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Depth limit when walking the page tree for inherited resources
const MAX_PARENT_DEPTH: usize = 32;

// =============================================================================
// Image Lookup
// =============================================================================

/// Decode the largest image XObject on a page.
pub(crate) fn extract_page_image(doc: &Document, page_id: ObjectId, page: usize) -> Result<RgbImage> {
    let render_err = |reason: String| RegroupError::Render { page, reason };

    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| render_err(e.to_string()))?;

    let stream = find_resources(doc, page_dict)
        .and_then(|resources| resources.get(b"XObject").ok())
        .and_then(|xobjects| resolve_dict(doc, xobjects))
        .and_then(|xobjects| largest_image(doc, xobjects))
        .ok_or_else(|| render_err("page has no embedded image".to_string()))?;

    decode_image(stream).map_err(render_err)
}

/// Page resources, following the `Parent` chain for inherited entries
fn find_resources<'a>(doc: &'a Document, page_dict: &'a Dictionary) -> Option<&'a Dictionary> {
    let mut current = page_dict;
    for _ in 0..MAX_PARENT_DEPTH {
        if let Ok(resources) = current.get(b"Resources") {
            return resolve_dict(doc, resources);
        }
        let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn largest_image<'a>(doc: &'a Document, xobjects: &'a Dictionary) -> Option<&'a Stream> {
    xobjects
        .iter()
        .filter_map(|(_, obj)| match obj {
            Object::Reference(id) => doc.get_object(*id).ok()?.as_stream().ok(),
            Object::Stream(stream) => Some(stream),
            _ => None,
        })
        .filter(|stream| is_image(stream))
        .max_by_key(|stream| {
            let (w, h) = image_size(stream);
            w as u64 * h as u64
        })
}

fn is_image(stream: &Stream) -> bool {
    matches!(
        stream.dict.get(b"Subtype").and_then(Object::as_name),
        Ok(name) if name == b"Image"
    )
}

fn image_size(stream: &Stream) -> (u32, u32) {
    let dim = |key: &[u8]| {
        stream
            .dict
            .get(key)
            .and_then(Object::as_i64)
            .ok()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0)
    };
    (dim(b"Width"), dim(b"Height"))
}

// =============================================================================
// Decoding
// =============================================================================

/// Names of the stream's filters, in application order
fn filter_names(stream: &Stream) -> Vec<Vec<u8>> {
    match stream.dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![name.clone()],
        Ok(Object::Array(names)) => names
            .iter()
            .filter_map(|n| n.as_name().ok().map(<[u8]>::to_vec))
            .collect(),
        _ => Vec::new(),
    }
}

fn decode_image(stream: &Stream) -> std::result::Result<RgbImage, String> {
    let (width, height) = image_size(stream);
    if width == 0 || height == 0 {
        return Err("image has no dimensions".to_string());
    }

    let filters = filter_names(stream);
    match filters.last().map(Vec::as_slice) {
        Some(b"DCTDecode") if filters.len() == 1 => {
            image::load_from_memory_with_format(&stream.content, ImageFormat::Jpeg)
                .map(|img| img.to_rgb8())
                .map_err(|e| format!("JPEG decode failed: {}", e))
        }
        Some(b"FlateDecode") => {
            let samples = stream
                .decompressed_content()
                .map_err(|e| format!("Flate decode failed: {}", e))?;
            samples_to_rgb(stream, width, height, samples)
        }
        None => samples_to_rgb(stream, width, height, stream.content.clone()),
        Some(other) => Err(format!(
            "unsupported image filter {}",
            String::from_utf8_lossy(other)
        )),
    }
}

/// Build an RGB buffer from raw 8-bit samples (DeviceRGB or DeviceGray)
fn samples_to_rgb(
    stream: &Stream,
    width: u32,
    height: u32,
    samples: Vec<u8>,
) -> std::result::Result<RgbImage, String> {
    let bits = stream
        .dict
        .get(b"BitsPerComponent")
        .and_then(Object::as_i64)
        .unwrap_or(8);
    if bits != 8 {
        return Err(format!("unsupported bit depth {}", bits));
    }

    let pixels = width as usize * height as usize;
    if samples.len() == pixels * 3 {
        RgbImage::from_raw(width, height, samples).ok_or_else(|| "bad RGB buffer".to_string())
    } else if samples.len() == pixels {
        GrayImage::from_raw(width, height, samples)
            .map(|gray| DynamicImage::ImageLuma8(gray).to_rgb8())
            .ok_or_else(|| "bad grayscale buffer".to_string())
    } else {
        Err(format!(
            "unexpected sample count {} for {}x{} image",
            samples.len(),
            width,
            height
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_stream(width: i64, height: i64, content: Vec<u8>) -> Stream {
        Stream::new(
            Dictionary::from_iter(vec![
                ("Type", Object::Name(b"XObject".to_vec())),
                ("Subtype", Object::Name(b"Image".to_vec())),
                ("Width", Object::Integer(width)),
                ("Height", Object::Integer(height)),
                ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
                ("BitsPerComponent", Object::Integer(8)),
            ]),
            content,
        )
    }

    #[test]
    fn test_decode_raw_rgb() {
        let stream = image_stream(2, 1, vec![255, 0, 0, 0, 0, 255]);
        let image = decode_image(&stream).unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 255]);
    }

    #[test]
    fn test_decode_raw_gray() {
        let stream = image_stream(2, 2, vec![0, 64, 128, 255]);
        let image = decode_image(&stream).unwrap();
        assert_eq!(image.get_pixel(1, 1).0, [255, 255, 255]);
    }

    #[test]
    fn test_decode_dct() {
        let scan = RgbImage::from_pixel(8, 4, image::Rgb([200, 200, 200]));
        let mut jpeg = Vec::new();
        scan.write_to(&mut std::io::Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        let mut stream = image_stream(8, 4, jpeg);
        stream.dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

        let image = decode_image(&stream).unwrap();
        assert_eq!(image.dimensions(), (8, 4));
        assert!(image.get_pixel(3, 2).0.iter().all(|&c| c.abs_diff(200) < 8));
    }

    #[test]
    fn test_decode_rejects_unknown_filter() {
        let mut stream = image_stream(1, 1, vec![0]);
        stream
            .dict
            .set("Filter", Object::Name(b"JBIG2Decode".to_vec()));
        assert!(decode_image(&stream).is_err());
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        let stream = image_stream(4, 4, vec![0; 10]);
        assert!(decode_image(&stream).is_err());
    }
}
