//! Fixed A4 layout for the travel plan.
//!
//! Coordinates in this module are millimetres measured from the top-left
//! corner; they are flipped to PDF's bottom-left origin only when drawn.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};

use super::{ReportRow, SUBTITLE, TABLE_HEAD};
use crate::error::Error;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const BAND_HEIGHT: f64 = 15.0;
const MARGIN: f64 = 14.0;
const LABEL_COLUMN: f64 = 40.0;
const CELL_PADDING: f64 = 2.0;

const TITLE_SIZE: f64 = 16.0;
const SUBTITLE_SIZE: f64 = 12.0;
const CELL_SIZE: f64 = 10.0;
const FOOTER_SIZE: f64 = 10.0;

const FIRST_TABLE_TOP: f64 = 30.0;
const CONTINUED_TABLE_TOP: f64 = BAND_HEIGHT + 5.0;
const TABLE_BOTTOM: f64 = PAGE_HEIGHT - BAND_HEIGHT - 5.0;

const PT_TO_MM: f64 = 25.4 / 72.0;

const BAND_GREY: (u8, u8, u8) = (200, 200, 200);
const HEAD_BLUE: (u8, u8, u8) = (41, 128, 185);
const STRIPE: (u8, u8, u8) = (245, 245, 245);
const WHITE: (u8, u8, u8) = (255, 255, 255);
const BLACK: (u8, u8, u8) = (0, 0, 0);

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedRow {
    /// Index into the rows handed to [`layout`].
    pub index: usize,
    pub top: f64,
    pub height: f64,
    pub location_lines: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    pub head_top: f64,
    pub rows: Vec<PlacedRow>,
}

fn line_height() -> f64 {
    CELL_SIZE * PT_TO_MM * 1.15
}

fn head_height() -> f64 {
    line_height() + 2.0 * CELL_PADDING
}

fn location_width() -> f64 {
    PAGE_WIDTH - 2.0 * MARGIN - LABEL_COLUMN - 2.0 * CELL_PADDING
}

/// Splits the table over as many pages as needed, repeating the head row.
pub fn layout(rows: &[ReportRow]) -> Vec<PageLayout> {
    let mut pages = vec![PageLayout {
        head_top: FIRST_TABLE_TOP,
        rows: Vec::new(),
    }];
    let mut cursor = FIRST_TABLE_TOP + head_height();

    for (index, row) in rows.iter().enumerate() {
        let location_lines = wrap(&row.location, CELL_SIZE, false, location_width());
        let height = location_lines.len().max(1) as f64 * line_height() + 2.0 * CELL_PADDING;

        let page_has_rows = pages.last().map_or(false, |page| !page.rows.is_empty());
        if cursor + height > TABLE_BOTTOM && page_has_rows {
            pages.push(PageLayout {
                head_top: CONTINUED_TABLE_TOP,
                rows: Vec::new(),
            });
            cursor = CONTINUED_TABLE_TOP + head_height();
        }

        if let Some(page) = pages.last_mut() {
            page.rows.push(PlacedRow {
                index,
                top: cursor,
                height,
                location_lines,
            });
        }
        cursor += height;
    }

    pages
}

pub(super) fn render(rows: &[ReportRow], title: &str, caption: &str) -> Result<Vec<u8>, Error> {
    let pages = layout(rows);

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    for (number, page) in pages.iter().enumerate() {
        let layer = if number == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };
        let canvas = Canvas {
            layer,
            fonts: &fonts,
        };

        canvas.header(title);
        if number == 0 {
            canvas.text(SUBTITLE, SUBTITLE_SIZE, false, BLACK, MARGIN + 1.0, 25.0);
        }
        canvas.table_head(page.head_top);
        for placed in &page.rows {
            canvas.table_row(&rows[placed.index], placed);
        }
        canvas.footer(caption);
    }

    Ok(doc.save_to_bytes()?)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

struct Canvas<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
}

impl Canvas<'_> {
    fn header(&self, title: &str) {
        self.band(0.0, BAND_GREY);
        let x = centered(title, TITLE_SIZE, true);
        self.text(title, TITLE_SIZE, true, WHITE, x, 10.0);
    }

    fn footer(&self, caption: &str) {
        self.band(PAGE_HEIGHT - BAND_HEIGHT, BAND_GREY);
        let x = centered(caption, FOOTER_SIZE, false);
        self.text(caption, FOOTER_SIZE, false, BLACK, x, PAGE_HEIGHT - 5.0);
    }

    fn band(&self, top: f64, colour: (u8, u8, u8)) {
        self.fill(0.0, top, PAGE_WIDTH, BAND_HEIGHT, colour);
    }

    fn table_head(&self, top: f64) {
        self.fill(MARGIN, top, PAGE_WIDTH - 2.0 * MARGIN, head_height(), HEAD_BLUE);
        let baseline = top + CELL_PADDING + CELL_SIZE * PT_TO_MM;
        self.text(TABLE_HEAD[0], CELL_SIZE, true, WHITE, MARGIN + CELL_PADDING, baseline);
        self.text(
            TABLE_HEAD[1],
            CELL_SIZE,
            true,
            WHITE,
            MARGIN + LABEL_COLUMN + CELL_PADDING,
            baseline,
        );
    }

    fn table_row(&self, row: &ReportRow, placed: &PlacedRow) {
        if placed.index % 2 == 1 {
            self.fill(
                MARGIN,
                placed.top,
                PAGE_WIDTH - 2.0 * MARGIN,
                placed.height,
                STRIPE,
            );
        }

        let baseline = placed.top + CELL_PADDING + CELL_SIZE * PT_TO_MM;
        self.text(&row.label, CELL_SIZE, false, BLACK, MARGIN + CELL_PADDING, baseline);
        for (line_number, line) in placed.location_lines.iter().enumerate() {
            self.text(
                line,
                CELL_SIZE,
                false,
                BLACK,
                MARGIN + LABEL_COLUMN + CELL_PADDING,
                baseline + line_number as f64 * line_height(),
            );
        }
    }

    fn fill(&self, left: f64, top: f64, width: f64, height: f64, colour: (u8, u8, u8)) {
        self.layer.set_fill_color(rgb(colour));
        self.layer.add_rect(
            Rect::new(
                mm(left),
                mm(PAGE_HEIGHT - top - height),
                mm(left + width),
                mm(PAGE_HEIGHT - top),
            )
            .with_mode(PaintMode::Fill),
        );
    }

    fn text(
        &self,
        text: &str,
        size: f64,
        bold: bool,
        colour: (u8, u8, u8),
        x: f64,
        baseline: f64,
    ) {
        let font = if bold {
            &self.fonts.bold
        } else {
            &self.fonts.regular
        };
        self.layer.set_fill_color(rgb(colour));
        self.layer
            .use_text(text, size as f32, mm(x), mm(PAGE_HEIGHT - baseline), font);
    }
}

fn mm(value: f64) -> Mm {
    Mm(value as f32)
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn centered(text: &str, size: f64, bold: bool) -> f64 {
    ((PAGE_WIDTH - text_width(text, size, bold)) / 2.0).max(0.0)
}

/// Approximate Helvetica advance width in millimetres.
///
/// Built-in PDF fonts carry no metrics we can query, so glyphs are bucketed
/// by their AFM widths.
pub(crate) fn text_width(text: &str, size: f64, bold: bool) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| match c {
            'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' | ' ' => 278,
            'f' | 't' | 'r' | '(' | ')' | '-' | 'I' => 333,
            'm' | 'M' => 833,
            'w' | 'W' => 778,
            c if c.is_ascii_uppercase() => 667,
            _ => 556,
        })
        .sum();
    let scale = if bold { 1.06 } else { 1.0 };

    f64::from(units) / 1000.0 * size * PT_TO_MM * scale
}

/// Greedy word wrap; a single word wider than `width` gets a line of its own.
fn wrap(text: &str, size: f64, bold: bool, width: f64) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, size, bold) <= width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Text drawn on each page, in drawing order.
#[cfg(test)]
pub(crate) fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
    use lopdf::{content::Content, Document, Object};

    fn strings(object: &Object, out: &mut Vec<String>) {
        match object {
            Object::String(bytes, _) => out.push(String::from_utf8_lossy(bytes).into_owned()),
            Object::Array(items) => items.iter().for_each(|item| strings(item, out)),
            _ => {}
        }
    }

    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            let mut texts = Vec::new();
            for operation in &content.operations {
                if operation.operator == "Tj" || operation.operator == "TJ" {
                    operation
                        .operands
                        .iter()
                        .for_each(|operand| strings(operand, &mut texts));
                }
            }
            texts
        })
        .collect()
}
