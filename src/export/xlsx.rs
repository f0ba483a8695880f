// SPDX-License-Identifier: MIT
// Export formatters — styled Excel workbook.

use rust_xlsxwriter::{Color, Format, Workbook};

use crate::export::{ExportError, COLUMNS, STEP_SEPARATOR};
use crate::generate::model::TestCaseSet;

const SHEET_NAME: &str = "Test Cases";
/// Column widths grow with content but never past this many character units.
const MAX_COLUMN_WIDTH: usize = 50;

/// Fill and font colors applied to a `Status` cell, keyed on the literal
/// cell value. Any other value receives default (unstyled) formatting.
pub fn status_colors(status: &str) -> Option<(u32, u32)> {
    match status {
        "Passed" => Some((0xC6EFCE, 0x006100)),
        "Failed" => Some((0xFFC7CE, 0x9C0006)),
        "Pending" => Some((0xFFEB9C, 0x9C6500)),
        _ => None,
    }
}

fn status_format(status: &str) -> Option<Format> {
    status_colors(status).map(|(fill, font)| {
        Format::new()
            .set_background_color(Color::RGB(fill))
            .set_font_color(Color::RGB(font))
            .set_bold()
    })
}

/// Build the seven-column workbook in memory and return the `.xlsx` bytes.
///
/// The table matches the CSV export cell-for-cell; on top of that the
/// `Status` column gets its conditional fill/font and every column is
/// auto-sized to its longest rendered value, capped at 50 character units.
pub fn format(set: &TestCaseSet) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (i, tc) in set.test_cases.iter().enumerate() {
        let row = (i + 1) as u32;
        let steps = tc.steps.join(STEP_SEPARATOR);
        let cells = [
            tc.id.as_str(),
            tc.title.as_str(),
            tc.scenario.as_str(),
            tc.case_type.as_str(),
            steps.as_str(),
            tc.expected_result.as_str(),
            tc.status.as_str(),
        ];
        for (col, cell) in cells.iter().enumerate() {
            widths[col] = widths[col].max(cell.len());
            // Status column is the last one.
            if col == cells.len() - 1 {
                match status_format(cell) {
                    Some(fmt) => {
                        worksheet.write_string_with_format(row, col as u16, *cell, &fmt)?
                    }
                    None => worksheet.write_string(row, col as u16, *cell)?,
                };
            } else {
                worksheet.write_string(row, col as u16, *cell)?;
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        let adjusted = (width + 2).min(MAX_COLUMN_WIDTH);
        worksheet.set_column_width(col as u16, adjusted as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::model::TestCase;

    #[test]
    fn known_statuses_get_colors() {
        assert_eq!(status_colors("Passed"), Some((0xC6EFCE, 0x006100)));
        assert_eq!(status_colors("Failed"), Some((0xFFC7CE, 0x9C0006)));
        assert_eq!(status_colors("Pending"), Some((0xFFEB9C, 0x9C6500)));
    }

    #[test]
    fn unknown_status_is_unstyled() {
        assert_eq!(status_colors("Blocked"), None);
        assert_eq!(status_colors(""), None);
        assert_eq!(status_colors("passed"), None, "matching is case-sensitive");
    }

    #[test]
    fn empty_set_still_produces_a_workbook() {
        let bytes = format(&TestCaseSet::default()).unwrap();
        // .xlsx is a zip archive — check the magic bytes.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn styled_rows_produce_a_workbook() {
        let set = TestCaseSet {
            test_cases: vec![
                TestCase {
                    id: "TC-001".to_string(),
                    status: "Passed".to_string(),
                    ..TestCase::default()
                },
                TestCase {
                    id: "TC-002".to_string(),
                    status: "Blocked".to_string(),
                    ..TestCase::default()
                },
            ],
            ..TestCaseSet::default()
        };
        let bytes = format(&set).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
