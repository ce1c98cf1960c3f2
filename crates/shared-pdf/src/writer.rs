//! Paginated PDF writer built directly on lopdf
//!
//! Content flows top to bottom with a caller-supplied line height. Before a
//! line is drawn, a cursor below the bottom margin starts a new page. Every
//! line carries its own font selection, so each page begins with exactly the
//! same text state as the first.

use crate::error::PdfWriteError;
use lopdf::{
    content::{Content, Operation},
    dictionary, Document, Object, ObjectId, Stream, StringFormat,
};

/// Page geometry in PDF points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin_x: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageLayout {
    /// US Letter with the report's margins
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_x: 40.0,
            margin_top: 40.0,
            margin_bottom: 50.0,
        }
    }

    fn top(&self) -> f32 {
        self.height - self.margin_top
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::letter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
}

impl FontFace {
    const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Oblique];

    fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Oblique => "F3",
        }
    }

    fn base_font(&self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Oblique => "Helvetica-Oblique",
        }
    }
}

/// Fill color, components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

pub struct PageWriter {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    layout: PageLayout,
    page_ids: Vec<ObjectId>,
    operations: Vec<Operation>,
    y: f32,
    font: FontFace,
    font_size: f32,
}

impl PageWriter {
    pub fn new(layout: PageLayout) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for face in FontFace::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), Object::Reference(font_id));
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        Self {
            doc,
            pages_id,
            resources_id,
            layout,
            page_ids: Vec::new(),
            operations: Vec::new(),
            y: layout.top(),
            font: FontFace::Regular,
            font_size: 10.0,
        }
    }

    pub fn set_font(&mut self, face: FontFace, size: f32) {
        self.font = face;
        self.font_size = size;
    }

    /// Vertical position of the next line's baseline
    pub fn cursor(&self) -> f32 {
        self.y
    }

    /// Pages started so far, including the one being written
    pub fn page_count(&self) -> usize {
        self.page_ids.len() + 1
    }

    /// Move the cursor down without drawing
    pub fn advance(&mut self, points: f32) {
        self.y -= points;
    }

    pub fn text_line(&mut self, text: &str, line_height: f32) -> Result<(), PdfWriteError> {
        self.ensure_room()?;
        self.push_text(text);
        self.y -= line_height;
        Ok(())
    }

    /// A text line drawn over a filled band the height of the line
    pub fn highlighted_line(
        &mut self,
        text: &str,
        fill: Rgb,
        line_height: f32,
    ) -> Result<(), PdfWriteError> {
        self.ensure_room()?;

        let x = self.layout.margin_x - 2.0;
        let band_width = self.layout.width - 2.0 * self.layout.margin_x + 4.0;
        let band_bottom = self.y - 3.0;
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("rg", vec![fill.0.into(), fill.1.into(), fill.2.into()]),
            Operation::new(
                "re",
                vec![
                    x.into(),
                    band_bottom.into(),
                    band_width.into(),
                    line_height.into(),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);

        self.push_text(text);
        self.y -= line_height;
        Ok(())
    }

    pub fn finish(mut self) -> Result<RenderedPdf, PdfWriteError> {
        self.flush_page()?;

        let page_count = self.page_ids.len();
        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| PdfWriteError::Save(e.to_string()))?;

        Ok(RenderedPdf { bytes, page_count })
    }

    fn ensure_room(&mut self) -> Result<(), PdfWriteError> {
        if self.y < self.layout.margin_bottom {
            self.flush_page()?;
            self.y = self.layout.top();
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        let x = self.layout.margin_x;
        let y = self.y;
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![self.font.resource_name().into(), self.font_size.into()],
            ),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn flush_page(&mut self) -> Result<(), PdfWriteError> {
        let content = Content {
            operations: std::mem::take(&mut self.operations),
        };
        let encoded = content
            .encode()
            .map_err(|e| PdfWriteError::Encode(e.to_string()))?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));

        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            self.layout.width.into(),
            self.layout.height.into(),
        ];
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => media_box,
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }
}

/// Encode for the standard fonts' WinAnsi encoding. Typographic punctuation
/// is folded to ASCII; anything else outside Latin-1 becomes '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push(b'\''),
            '\u{201C}' | '\u{201D}' => out.push(b'"'),
            '\u{2013}' | '\u{2014}' => out.push(b'-'),
            '\u{2022}' => out.push(b'*'),
            '\u{2026}' => out.extend_from_slice(b"..."),
            c if (c as u32) < 0x80 => out.push(c as u8),
            c if (0xA0..=0xFF).contains(&(c as u32)) => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}
