//! Renders a `ReportBook` into a styled xlsx workbook.

use super::{ReportBook, ReportRow, FIRST_DATA_ROW};
use crate::device::DeviceProfile;
use crate::scores::{ScoreBand, ScoreSet};
use rust_xlsxwriter::{
    Format, FormatAlign, FormatBorder, FormatUnderline, Url, Workbook, Worksheet, XlsxError,
};

/// Last used column (0-indexed): URL plus three four-column device groups
const LAST_COLUMN: u16 = 12;

const URL_COLUMN_WIDTH: f64 = 50.0;
const SCORE_COLUMN_WIDTH: f64 = 15.0;
const DATA_ROW_HEIGHT: f64 = 20.0;

const HEADER_TEXT_COLOR: u32 = 0xFFFFFF;
const URL_HEADER_FILL: u32 = 0x000000;
const SUBHEADER_FILL: u32 = 0xD9EAD3;
const HYPERLINK_COLOR: u32 = 0x0000FF;

fn group_fill(device: DeviceProfile) -> u32 {
    match device {
        DeviceProfile::Desktop => 0x4F81BD,
        DeviceProfile::Mobile => 0x92D050,
        DeviceProfile::Tablet => 0xFFC000,
    }
}

pub(super) fn render(book: &ReportBook) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(book.sheet_name())?;

    write_layout(sheet, book.environment(), book.date())?;
    for (i, row) in book.rows().iter().enumerate() {
        write_row(sheet, FIRST_DATA_ROW + i as u32, row)?;
    }

    Ok(workbook)
}

/// Title block, two-row header with per-group merges, and column widths.
/// Depends only on (environment, date), never on the data rows.
fn write_layout(sheet: &mut Worksheet, environment: &str, date: &str) -> Result<(), XlsxError> {
    let title = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);
    sheet.merge_range(
        0,
        0,
        0,
        LAST_COLUMN,
        &format!("Environment: {environment}"),
        &title,
    )?;
    sheet.merge_range(1, 0, 1, LAST_COLUMN, &format!("Lighthouse {date}"), &title)?;

    let url_header = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_font_color(HEADER_TEXT_COLOR)
        .set_background_color(URL_HEADER_FILL)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);
    sheet.merge_range(3, 0, 4, 0, "URL", &url_header)?;

    let subheader = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_background_color(SUBHEADER_FILL)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    for device in DeviceProfile::ALL {
        let first = device.score_column();
        let group = Format::new()
            .set_bold()
            .set_font_size(12)
            .set_font_color(HEADER_TEXT_COLOR)
            .set_background_color(group_fill(device))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);
        sheet.merge_range(3, first, 3, first + 3, device.label(), &group)?;

        for (i, label) in ScoreSet::LABELS.iter().enumerate() {
            sheet.write_with_format(4, first + i as u16, *label, &subheader)?;
        }
    }

    sheet.set_column_width(0, URL_COLUMN_WIDTH)?;
    for col in 1..=LAST_COLUMN {
        sheet.set_column_width(col, SCORE_COLUMN_WIDTH)?;
    }

    Ok(())
}

fn write_row(sheet: &mut Worksheet, excel_row: u32, row: &ReportRow) -> Result<(), XlsxError> {
    sheet.set_row_height(excel_row, DATA_ROW_HEIGHT)?;

    let url_format = Format::new()
        .set_font_size(10)
        .set_font_color(HYPERLINK_COLOR)
        .set_underline(FormatUnderline::Single)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);
    sheet.write_url_with_format(excel_row, 0, Url::new(&row.url), &url_format)?;

    let blank = Format::new()
        .set_font_size(10)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    for device in DeviceProfile::ALL {
        let first = device.score_column();
        match row.scores[device.index()] {
            Some(scores) => {
                for (i, value) in scores.as_array().into_iter().enumerate() {
                    let format = blank
                        .clone()
                        .set_font_color(ScoreBand::classify(value).font_color());
                    sheet.write_with_format(excel_row, first + i as u16, value, &format)?;
                }
            }
            // Absent device groups stay blank, never zero; borders still apply
            None => {
                for i in 0..4u16 {
                    sheet.write_with_format(excel_row, first + i, "", &blank)?;
                }
            }
        }
    }

    Ok(())
}
