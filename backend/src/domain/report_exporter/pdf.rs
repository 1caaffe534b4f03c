//! PDF rendering of a [`TabularView`].
//!
//! Landscape US-Letter, a title, an optional subtitle and a gridded table.
//! The header row is grey with near-white bold text, data rows alternate
//! between two light backgrounds and every cell is centered. Rows that do
//! not fit on a page continue on the next one under a repeated header row.
//!
//! Layout is computed in PDF points and converted to millimetres only when
//! talking to printpdf.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Pt,
    Rect, Rgb,
};
use std::ops::Range;

use crate::domain::models::TabularView;

const PAGE_WIDTH: f32 = 792.0;
const PAGE_HEIGHT: f32 = 612.0;
const MARGIN: f32 = 25.0;

const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_SIZE: f32 = 11.0;
const CELL_FONT_SIZE: f32 = 9.0;
const ROW_HEIGHT: f32 = 16.0;
const PARAGRAPH_GAP: f32 = 12.0;
const CELL_PADDING: f32 = 3.0;
const GRID_THICKNESS: f32 = 0.5;

/// Header column width: points per header character, then clamped
const WIDTH_PER_CHAR: f32 = 7.0;
const MIN_COLUMN_WIDTH: f32 = 60.0;
const MAX_COLUMN_WIDTH: f32 = 150.0;

const ELLIPSIS: &str = "...";

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722, 722, 667,
    611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500,
    222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths (1/1000 em) for ASCII 32..=126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722, 722, 667,
    611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556,
    278, 889, 611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for characters outside the ASCII tables
const FALLBACK_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shade {
    r: f32,
    g: f32,
    b: f32,
}

impl Shade {
    const fn grey(level: f32) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }

    fn color(&self) -> Color {
        Color::Rgb(Rgb::new(self.r, self.g, self.b, None))
    }
}

const BLACK: Shade = Shade::grey(0.0);
const HEADER_BACKGROUND: Shade = Shade::grey(0.5);
const WHITE_SMOKE: Shade = Shade::grey(0.96);
const LIGHT_GREY: Shade = Shade::grey(0.83);
/// Data row backgrounds, alternating
const ROW_BANDS: [Shade; 2] = [WHITE_SMOKE, LIGHT_GREY];

/// Failure while producing the PDF
#[derive(Debug, thiserror::Error)]
#[error("PDF rendering failed: {0}")]
pub struct PdfRenderError(String);

impl PdfRenderError {
    fn from_printpdf(e: printpdf::Error) -> Self {
        PdfRenderError(format!("{e:?}"))
    }
}

/// Width in points of `text` set in Helvetica (bold or regular) at `size`
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let table = if bold {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };

    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                table[(code - 32) as usize] as u32
            } else {
                FALLBACK_WIDTH as u32
            }
        })
        .sum();

    units as f32 * size / 1000.0
}

/// Column widths for the given headers, fitted to `available` points.
///
/// Each header gets `chars * 7pt` clamped to 60..150pt; the widths are then
/// scaled together so the table spans exactly the printable width.
pub fn column_widths(columns: &[String], available: f32) -> Vec<f32> {
    let base: Vec<f32> = columns
        .iter()
        .map(|column| {
            (column.chars().count() as f32 * WIDTH_PER_CHAR).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect();

    let total: f32 = base.iter().sum();
    if total <= 0.0 {
        return base;
    }

    let scale = available / total;
    base.into_iter().map(|width| width * scale).collect()
}

/// Split `row_count` rows into pages holding `first_capacity` rows on the
/// first page and `other_capacity` rows on the following ones.
///
/// Always returns at least one page, possibly empty.
pub fn paginate(row_count: usize, first_capacity: usize, other_capacity: usize) -> Vec<Range<usize>> {
    let first_capacity = first_capacity.max(1);
    let other_capacity = other_capacity.max(1);

    let mut pages = Vec::new();
    let mut start = 0;
    let mut capacity = first_capacity;
    loop {
        let end = (start + capacity).min(row_count);
        pages.push(start..end);
        if end >= row_count {
            break;
        }
        start = end;
        capacity = other_capacity;
    }
    pages
}

/// Shorten `text` with a trailing ellipsis until it fits in `max_width`
fn fit_text(text: &str, max_width: f32, size: f32, bold: bool) -> String {
    if text_width(text, size, bold) <= max_width {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + ELLIPSIS;
        if text_width(&candidate, size, bold) <= max_width {
            return candidate;
        }
    }
    String::new()
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Draws the table onto one page layer
struct TablePainter<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
    widths: &'a [f32],
}

impl TablePainter<'_> {
    /// Draw one row whose top edge is at `top`; returns the top of the next row
    fn row(&self, cells: &[String], top: f32, background: Shade, header: bool) -> f32 {
        let bottom = top - ROW_HEIGHT;
        let (font, text_shade) = if header {
            (&self.fonts.bold, WHITE_SMOKE)
        } else {
            (&self.fonts.regular, BLACK)
        };

        let mut left = MARGIN;
        for (index, width) in self.widths.iter().enumerate() {
            let right = left + width;

            self.layer.set_fill_color(background.color());
            self.layer
                .add_rect(Rect::new(mm(left), mm(bottom), mm(right), mm(top)).with_mode(PaintMode::Fill));

            self.layer.set_outline_color(BLACK.color());
            self.layer.set_outline_thickness(GRID_THICKNESS);
            self.layer.add_line(Line {
                points: vec![
                    (Point::new(mm(left), mm(bottom)), false),
                    (Point::new(mm(right), mm(bottom)), false),
                    (Point::new(mm(right), mm(top)), false),
                    (Point::new(mm(left), mm(top)), false),
                ],
                is_closed: true,
            });

            let raw = cells.get(index).map(String::as_str).unwrap_or("");
            let text = fit_text(raw, width - 2.0 * CELL_PADDING, CELL_FONT_SIZE, header);
            if !text.is_empty() {
                let text_x = left + (width - text_width(&text, CELL_FONT_SIZE, header)) / 2.0;
                let baseline = bottom + (ROW_HEIGHT - CELL_FONT_SIZE * 0.7) / 2.0;
                self.layer.set_fill_color(text_shade.color());
                self.layer
                    .use_text(text, CELL_FONT_SIZE, mm(text_x), mm(baseline), font);
            }

            left = right;
        }

        bottom
    }
}

/// Draw a horizontally centered paragraph with its first line top at `top`;
/// returns the vertical position below it
fn paragraph(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    text: &str,
    size: f32,
    bold: bool,
    top: f32,
) -> f32 {
    let baseline = top - size;
    let x = ((PAGE_WIDTH - text_width(text, size, bold)) / 2.0).max(MARGIN);
    let font = if bold { &fonts.bold } else { &fonts.regular };
    layer.set_fill_color(BLACK.color());
    layer.use_text(text, size, mm(x), mm(baseline), font);
    baseline - PARAGRAPH_GAP
}

/// Render `view` as a PDF document
pub fn render_pdf(
    view: &TabularView,
    title: &str,
    subtitle: Option<&str>,
) -> Result<Vec<u8>, PdfRenderError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Tabla");

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(PdfRenderError::from_printpdf)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(PdfRenderError::from_printpdf)?,
    };

    let printable_width = PAGE_WIDTH - 2.0 * MARGIN;
    let widths = column_widths(&view.columns, printable_width);

    let first_layer = doc.get_page(first_page).get_layer(first_layer);
    let mut table_top = paragraph(
        &first_layer,
        &fonts,
        title,
        TITLE_SIZE,
        true,
        PAGE_HEIGHT - MARGIN,
    );
    if let Some(subtitle) = subtitle.filter(|s| !s.trim().is_empty()) {
        table_top = paragraph(&first_layer, &fonts, subtitle, SUBTITLE_SIZE, false, table_top);
    }

    // One row on every page is taken by the repeated header
    let rows_fitting =
        |top: f32| (((top - MARGIN) / ROW_HEIGHT).floor() as usize).saturating_sub(1);
    let pages = paginate(
        view.rows.len(),
        rows_fitting(table_top),
        rows_fitting(PAGE_HEIGHT - MARGIN),
    );

    let mut first_layer = Some(first_layer);
    for rows in pages {
        let (layer, top) = match first_layer.take() {
            Some(layer) => (layer, table_top),
            None => {
                let (page, layer) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Tabla");
                (doc.get_page(page).get_layer(layer), PAGE_HEIGHT - MARGIN)
            }
        };

        let painter = TablePainter {
            layer,
            fonts: &fonts,
            widths: &widths,
        };

        let mut cursor = painter.row(&view.columns, top, HEADER_BACKGROUND, true);
        for (offset, row) in view.rows[rows].iter().enumerate() {
            cursor = painter.row(row, cursor, ROW_BANDS[offset % ROW_BANDS.len()], false);
        }
    }

    doc.save_to_bytes().map_err(PdfRenderError::from_printpdf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        [
            "Tipo",
            "Departamento",
            "Sucursal",
            "Responsable",
            "Posicion",
            "Nombre de Equipo",
            "Correo",
            "Fecha de Mantenimiento",
            "Hora",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_column_widths_span_printable_width() {
        let available = PAGE_WIDTH - 2.0 * MARGIN;
        let widths = column_widths(&headers(), available);

        assert_eq!(widths.len(), 9);
        let total: f32 = widths.iter().sum();
        assert!((total - available).abs() < 0.01);
    }

    #[test]
    fn test_column_widths_are_proportional_to_clamped_headers() {
        let columns: Vec<String> = vec!["A".into(), "Exactly twelve".into(), "x".repeat(40)];
        let widths = column_widths(&columns, 60.0 + 98.0 + 150.0);

        assert!((widths[0] - 60.0).abs() < 0.01);
        assert!((widths[1] - 98.0).abs() < 0.01);
        assert!((widths[2] - 150.0).abs() < 0.01);
    }

    #[test]
    fn test_headers_fit_their_columns() {
        let cols = headers();
        let widths = column_widths(&cols, PAGE_WIDTH - 2.0 * MARGIN);

        for (header, width) in cols.iter().zip(&widths) {
            assert!(
                text_width(header, CELL_FONT_SIZE, true) <= width - 2.0 * CELL_PADDING,
                "header '{header}' would be truncated"
            );
            assert_eq!(fit_text(header, width - 2.0 * CELL_PADDING, CELL_FONT_SIZE, true), *header);
        }
    }

    #[test]
    fn test_fit_text_adds_ellipsis() {
        let long = "a.very.long.email.address@example-company.com";
        let fitted = fit_text(long, 60.0, CELL_FONT_SIZE, false);

        assert!(fitted.ends_with(ELLIPSIS));
        assert!(text_width(&fitted, CELL_FONT_SIZE, false) <= 60.0);
        assert_eq!(fit_text("PC-1", 60.0, CELL_FONT_SIZE, false), "PC-1");
    }

    #[test]
    fn test_paginate() {
        assert_eq!(paginate(0, 20, 30), vec![0..0]);
        assert_eq!(paginate(20, 20, 30), vec![0..20]);
        assert_eq!(paginate(21, 20, 30), vec![0..20, 20..21]);
        assert_eq!(paginate(85, 20, 30), vec![0..20, 20..50, 50..80, 80..85]);
    }

    #[test]
    fn test_render_empty_view_has_header_and_no_data_rows() {
        let view = TabularView {
            columns: headers(),
            rows: Vec::new(),
        };

        let bytes = render_pdf(&view, "Calendario", None).expect("Failed to render");

        assert!(bytes.starts_with(b"%PDF"));
        let pages = page_texts(&bytes);
        assert_eq!(pages.len(), 1);
        let mut expected = vec!["Calendario".to_string()];
        expected.extend(headers());
        assert_eq!(pages[0], expected);
    }

    #[test]
    fn test_render_multi_page_view_repeats_header() {
        let rows: Vec<Vec<String>> = (0..120)
            .map(|i| {
                let mut row = vec![String::new(); 9];
                row[5] = format!("PC-{i}");
                row
            })
            .collect();
        let view = TabularView {
            columns: headers(),
            rows,
        };

        let bytes = render_pdf(&view, "Calendario", Some("Semana 43 de 2025"))
            .expect("Failed to render");

        let pages = page_texts(&bytes);
        // 30 rows under the title block, then 34 per page
        assert_eq!(pages.len(), 4);
        assert_eq!(&pages[0][..2], &["Calendario", "Semana 43 de 2025"]);
        for page in &pages {
            let header_cells = page.iter().filter(|text| headers().contains(text)).count();
            assert_eq!(header_cells, 9);
            assert_eq!(page.iter().filter(|text| *text == "Nombre de Equipo").count(), 1);
        }

        let names: Vec<&String> = pages
            .iter()
            .flatten()
            .filter(|text| text.starts_with("PC-"))
            .collect();
        let expected: Vec<String> = (0..120).map(|i| format!("PC-{i}")).collect();
        assert_eq!(names, expected.iter().collect::<Vec<_>>());
        assert_eq!(
            pages[0].iter().filter(|text| text.starts_with("PC-")).count(),
            30
        );
    }
}

/// Text drawn on each page of a rendered PDF, in drawing order
#[cfg(test)]
pub(crate) fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
    use lopdf::content::Content;
    use lopdf::{Document, Object};

    let document = Document::load_mem(bytes).expect("Failed to parse rendered PDF");
    document
        .get_pages()
        .into_values()
        .map(|page_id| {
            let content = document
                .get_page_content(page_id)
                .expect("Failed to read page content");
            let operations = Content::decode(&content)
                .expect("Failed to decode page content")
                .operations;
            operations
                .iter()
                .filter(|operation| operation.operator == "Tj")
                .filter_map(|operation| match operation.operands.first() {
                    Some(Object::String(raw, _)) => Some(decode_text(raw)),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

/// Builtin fonts use a single-byte encoding; embedded ones write UTF-16BE
#[cfg(test)]
fn decode_text(raw: &[u8]) -> String {
    let utf16 = raw.len() % 2 == 0 && !raw.is_empty() && raw.iter().step_by(2).all(|b| *b == 0);
    if utf16 {
        raw.iter().skip(1).step_by(2).map(|b| *b as char).collect()
    } else {
        raw.iter().map(|b| *b as char).collect()
    }
}
