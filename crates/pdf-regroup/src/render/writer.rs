//! `lopdf` implementation of [`SheetCanvas`]

use crate::layout::Rect;
use crate::types::{RegroupError, Result};
use image::RgbImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::canvas::{SheetCanvas, StrokeStyle, TextStyle};
use super::xobject::{create_image_xobject, image_placement_command};

/// Resource name of the Helvetica font on every page
const FONT_NAME: &str = "F1";

/// Builds an output PDF one sheet at a time
pub struct PdfSheetWriter {
    output: Document,
    pages_tree_id: ObjectId,
    font_id: ObjectId,
    page_refs: Vec<Object>,
    current: Option<PageBuilder>,
}

/// The sheet currently being drawn
struct PageBuilder {
    width_pt: f32,
    height_pt: f32,
    content_ops: Vec<String>,
    xobjects: Dictionary,
    image_count: usize,
}

impl PdfSheetWriter {
    pub fn new() -> Self {
        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();

        let mut font_dict = Dictionary::new();
        font_dict.set("Type", Object::Name(b"Font".to_vec()));
        font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        let font_id = output.add_object(font_dict);

        Self {
            output,
            pages_tree_id,
            font_id,
            page_refs: Vec::new(),
            current: None,
        }
    }

    /// Number of sheets finished so far
    pub fn sheet_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Close the document: write the page tree and catalog.
    ///
    /// A sheet still open at this point is discarded.
    pub fn finish(mut self) -> Document {
        if self.current.is_some() {
            log::warn!("Discarding unfinished sheet {}", self.page_refs.len());
        }

        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        self.output
    }

    fn page_mut(&mut self) -> Result<&mut PageBuilder> {
        let sheet = self.page_refs.len();
        self.current.as_mut().ok_or_else(|| RegroupError::Assembly {
            sheet,
            reason: "no sheet is open".to_string(),
        })
    }
}

impl Default for PdfSheetWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetCanvas for PdfSheetWriter {
    fn new_page(&mut self, width_pt: f32, height_pt: f32) -> Result<()> {
        if self.current.is_some() {
            return Err(RegroupError::Assembly {
                sheet: self.page_refs.len(),
                reason: "previous sheet was not finished".to_string(),
            });
        }
        if !(width_pt > 0.0 && height_pt > 0.0) {
            return Err(RegroupError::Assembly {
                sheet: self.page_refs.len(),
                reason: format!("invalid sheet size {}x{}", width_pt, height_pt),
            });
        }

        self.current = Some(PageBuilder {
            width_pt,
            height_pt,
            content_ops: Vec::new(),
            xobjects: Dictionary::new(),
            image_count: 0,
        });
        Ok(())
    }

    fn draw_rect(&mut self, rect: &Rect, style: &StrokeStyle) -> Result<()> {
        let page = self.page_mut()?;
        page.content_ops.push(format!(
            "q {} G {} w {} {} {} {} re S Q\n",
            style.gray, style.line_width, rect.x, rect.y, rect.width, rect.height
        ));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, origin: (f32, f32), style: &TextStyle) -> Result<()> {
        let page = self.page_mut()?;
        page.content_ops.push(format!(
            "q {} g BT /{} {} Tf {} {} Td ({}) Tj ET Q\n",
            style.gray,
            FONT_NAME,
            style.font_size,
            origin.0,
            origin.1,
            escape_text(text)
        ));
        Ok(())
    }

    fn draw_image(&mut self, image: &RgbImage, rect: &Rect) -> Result<()> {
        if image.width() == 0 || image.height() == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
            log::debug!("Skipping empty image placement");
            return Ok(());
        }

        // Fail before writing the object so nothing dangles
        self.page_mut()?;
        let xobject_id = create_image_xobject(&mut self.output, image)?;

        let page = self.page_mut()?;
        let name = format!("Im{}", page.image_count);
        page.image_count += 1;
        page.xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));
        page.content_ops.push(image_placement_command(
            &name,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
        ));
        Ok(())
    }

    fn finish_sheet(&mut self) -> Result<()> {
        let sheet = self.page_refs.len();
        let page = self.current.take().ok_or_else(|| RegroupError::Assembly {
            sheet,
            reason: "no sheet is open".to_string(),
        })?;

        let mut fonts = Dictionary::new();
        fonts.set(FONT_NAME, Object::Reference(self.font_id));

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        if !page.xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(page.xobjects));
        }

        let content = page.content_ops.join("");
        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width_pt),
                Object::Real(page.height_pt),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        Ok(())
    }
}

/// Escape a string for use inside a PDF literal string
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BORDER_STYLE, LABEL_STYLE};

    fn content_of(doc: &Document, page_id: ObjectId) -> String {
        let content = doc.get_page_content(page_id).unwrap();
        String::from_utf8(content).unwrap()
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("E1-P1"), "E1-P1");
        assert_eq!(escape_text("Groups [1, 2] (x)"), "Groups [1, 2] \\(x\\)");
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("Teză"), "Tez?");
    }

    #[test]
    fn test_blank_sheets_produce_pages() {
        let mut writer = PdfSheetWriter::new();
        for _ in 0..3 {
            writer.new_page(842.0, 595.0).unwrap();
            writer.finish_sheet().unwrap();
        }
        assert_eq!(writer.sheet_count(), 3);

        let doc = writer.finish();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_drawing_operations_reach_content_stream() {
        let mut writer = PdfSheetWriter::new();
        writer.new_page(842.0, 595.0).unwrap();
        writer
            .draw_rect(&Rect::new(10.0, 20.0, 100.0, 50.0), &BORDER_STYLE)
            .unwrap();
        writer.draw_text("E3-P1", (12.0, 62.0), &LABEL_STYLE).unwrap();
        let image = RgbImage::from_pixel(4, 4, image::Rgb([0, 0, 0]));
        writer
            .draw_image(&image, &Rect::new(11.0, 21.0, 40.0, 40.0))
            .unwrap();
        writer.finish_sheet().unwrap();

        let doc = writer.finish();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let content = content_of(&doc, page_id);

        assert!(content.contains("0.5 G 0.5 w 10 20 100 50 re S"));
        assert!(content.contains("/F1 5 Tf 12 62 Td (E3-P1) Tj"));
        assert!(content.contains("q 40 0 0 40 11 21 cm /Im0 Do Q"));
    }

    #[test]
    fn test_sequence_errors_are_assembly_errors() {
        let mut writer = PdfSheetWriter::new();
        assert!(matches!(
            writer.finish_sheet(),
            Err(RegroupError::Assembly { sheet: 0, .. })
        ));
        assert!(matches!(
            writer.draw_rect(&Rect::default(), &BORDER_STYLE),
            Err(RegroupError::Assembly { .. })
        ));

        writer.new_page(100.0, 100.0).unwrap();
        assert!(matches!(
            writer.new_page(100.0, 100.0),
            Err(RegroupError::Assembly { .. })
        ));
    }

    #[test]
    fn test_rejects_degenerate_sheet_size() {
        let mut writer = PdfSheetWriter::new();
        assert!(writer.new_page(0.0, 100.0).is_err());
    }
}
