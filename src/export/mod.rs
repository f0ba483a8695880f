// SPDX-License-Identifier: MIT
// Export formatters — JSON / CSV / text / Excel.
//
// Each formatter takes a record set and produces a text or byte payload,
// deterministically ordered by `test_cases` sequence order. Formatters are
// default-tolerant: a set normalized from raw decoded output never makes
// them fail on an absent field.

pub mod csv;
pub mod json;
pub mod text;
pub mod xlsx;

/// Fixed column set shared by the CSV and Excel exports.
pub const COLUMNS: [&str; 7] = [
    "ID",
    "Title",
    "Scenario",
    "Type",
    "Steps",
    "Expected Result",
    "Status",
];

/// Separator used to flatten a record's step list into one table cell.
pub const STEP_SEPARATOR: &str = "; ";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}
