//! XLSX rendering of a [`TabularView`].
//!
//! One worksheet, bold header row, one row per record. The document
//! creation timestamp is pinned so the same view always produces the same
//! bytes.

use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook, XlsxError,
};

use crate::domain::models::TabularView;

/// Name of the single worksheet of a report
pub const REPORT_SHEET_NAME: &str = "Mantenimiento";

/// Header fill, same grey as the PDF header row
const HEADER_BACKGROUND: u32 = 0x808080;
const HEADER_TEXT: u32 = 0xF5F5F5;

pub fn render_spreadsheet(view: &TabularView) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new()
        .set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
    workbook.set_properties(&properties);

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(HEADER_TEXT))
        .set_background_color(Color::RGB(HEADER_BACKGROUND))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(REPORT_SHEET_NAME)?;

    for (col, column) in view.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column, &header_format)?;
    }

    for (index, row) in view.rows.iter().enumerate() {
        let row_number = index as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                worksheet.write_blank(row_number, col as u16, &cell_format)?;
            } else {
                worksheet.write_string_with_format(row_number, col as u16, cell, &cell_format)?;
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();

    workbook.save_to_buffer()
}
