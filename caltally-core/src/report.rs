//! Spreadsheet report rendering.
//!
//! Produces a single-sheet workbook: one row per pattern, one column per
//! day of the analysis range, hours in the cells.

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use crate::error::{TallyError, TallyResult};
use crate::stats::DailySeries;

const HEADER_FILL: u32 = 0xE2EFDA;
const LABEL_FILL: u32 = 0xBDD7EE;
const CELL_FILL: u32 = 0xFCE4D6;

const COLUMN_WIDTH: f64 = 15.0;

struct ReportFormats {
    header: Format,
    label: Format,
    number: Format,
    empty: Format,
}

fn create_formats() -> ReportFormats {
    let centered = Format::new()
        .set_background_color(CELL_FILL)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    ReportFormats {
        header: Format::new().set_background_color(HEADER_FILL),
        label: Format::new().set_background_color(LABEL_FILL),
        number: centered.clone().set_num_format("0.0"),
        empty: centered,
    }
}

/// Render the day-grid report to workbook bytes.
///
/// `series` rows must be aligned with `days` (one hours entry per day);
/// zero-hour days render as `-` cells.
pub fn render_to_bytes(days: &[NaiveDate], series: &[DailySeries]) -> TallyResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let formats = create_formats();

    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Calendar analysis")
        .map_err(|e| TallyError::Report(e.to_string()))?;

    sheet
        .write(0, 0, "Date / Regex pattern")
        .map_err(|e| TallyError::Report(e.to_string()))?;

    for (col, day) in days.iter().enumerate() {
        let label = format!("{}-{}-{}", day.day(), day.month(), day.year());
        sheet
            .write_with_format(0, col as u16 + 1, &label, &formats.header)
            .map_err(|e| TallyError::Report(e.to_string()))?;
    }

    for (row, pattern) in series.iter().enumerate() {
        let row = row as u32 + 1;
        sheet
            .write_with_format(row, 0, &pattern.name, &formats.label)
            .map_err(|e| TallyError::Report(e.to_string()))?;

        for (col, hours) in pattern.hours.iter().enumerate() {
            let col = col as u16 + 1;
            match hours {
                Some(h) => sheet.write_with_format(row, col, *h, &formats.number),
                None => sheet.write_with_format(row, col, "-", &formats.empty),
            }
            .map_err(|e| TallyError::Report(e.to_string()))?;
        }
    }

    // Keep the header row and pattern column visible while scrolling
    sheet
        .set_freeze_panes(1, 1)
        .map_err(|e| TallyError::Report(e.to_string()))?;

    for col in 0..=days.len() as u16 {
        sheet
            .set_column_width(col, COLUMN_WIDTH)
            .map_err(|e| TallyError::Report(e.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| TallyError::Report(e.to_string()))
}
