//! A4 portrait table reports rendered with the PDF base-14 fonts.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use crate::error::ExportError;
use crate::report::ReportTable;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const TOP: f32 = PAGE_HEIGHT - 20.0;
const BOTTOM: f32 = 20.0;
const ROW_HEIGHT: f32 = 6.0;
const BODY_SIZE: f32 = 9.0;
/// Rough Helvetica advance at `BODY_SIZE`, in millimetres per character.
const CHAR_WIDTH: f32 = 1.75;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Cursor over the pages of one document; starts a new page when the next
/// line would cross the bottom margin.
struct Writer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    y: f32,
    pages: usize,
}

impl Writer {
    fn new(title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| ExportError::Pdf(e.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| ExportError::Pdf(e.to_string()))?,
        };
        Ok(Self {
            doc,
            layer,
            fonts,
            y: TOP,
            pages: 1,
        })
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y - height < BOTTOM {
            self.pages += 1;
            let (page, layer) = self.doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Layer {}", self.pages),
            );
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP;
        }
    }

    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.fonts.bold } else { &self.fonts.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.ensure_room(size * 0.6);
        self.text(text, size, MARGIN, bold);
        self.y -= size * 0.6;
    }

    fn rule(&mut self) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    fn row(&mut self, cells: &[String], columns: &[f32], bold: bool) {
        self.ensure_room(ROW_HEIGHT);
        let mut x = MARGIN;
        for (cell, width) in cells.iter().zip(columns) {
            self.text(&fit(cell, *width), BODY_SIZE, x, bold);
            x += width;
        }
        self.y -= ROW_HEIGHT;
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        let mut writer = BufWriter::new(Vec::<u8>::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| ExportError::Pdf(e.to_string()))
    }
}

/// Truncate a cell to the characters that fit its column.
fn fit(cell: &str, width: f32) -> String {
    let max = ((width - 2.0) / CHAR_WIDTH).floor().max(1.0) as usize;
    if cell.chars().count() <= max {
        cell.to_string()
    } else {
        let mut out: String = cell.chars().take(max.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}

/// Render `table` as a PDF: title, filter lines, a bold header row with a
/// rule under it, data rows (breaking onto new pages as needed, with the
/// header repeated) and the footer lines.
pub fn render(table: &ReportTable) -> Result<Vec<u8>, ExportError> {
    let mut w = Writer::new(&table.title)?;

    w.line(&table.title, 16.0, true);
    w.y -= 2.0;
    for line in &table.lines {
        w.line(line, 10.0, false);
    }
    w.y -= 4.0;

    let count = table.headers.len().max(1);
    let column = (PAGE_WIDTH - 2.0 * MARGIN) / count as f32;
    let columns = vec![column; count];

    let header = |w: &mut Writer| {
        w.row(&table.headers, &columns, true);
        w.y += ROW_HEIGHT - 2.0;
        w.rule();
        w.y -= 4.5;
    };
    header(&mut w);

    for row in &table.rows {
        if w.y - ROW_HEIGHT < BOTTOM {
            w.ensure_room(ROW_HEIGHT * 2.0);
            header(&mut w);
        }
        w.row(row, &columns, false);
    }

    if !table.footer.is_empty() {
        w.y -= 4.0;
        for line in &table.footer {
            w.line(line, 11.0, true);
        }
    }

    let pages = w.pages;
    let bytes = w.finish()?;
    tracing::info!(
        "Rendered PDF '{}' ({} rows, {} pages, {} bytes)",
        table.title,
        table.rows.len(),
        pages,
        bytes.len()
    );
    Ok(bytes)
}
