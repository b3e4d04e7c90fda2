//! `.xlsx` encoding of the survey table.
//!
//! The first worksheet holds a bold header row `Name`, `Gender` followed by
//! one row per record. Writing uses `rust_xlsxwriter`; reading uses
//! `calamine`.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use crate::domain::SurveyRecord;
use crate::domain::ports::{SurveyExportError, SurveyExporter};

/// MIME type of `.xlsx` workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header of the name column.
pub const NAME_HEADER: &str = "Name";
/// Header of the gender column.
pub const GENDER_HEADER: &str = "Gender";

const NAME_COLUMN: u16 = 0;
const GENDER_COLUMN: u16 = 1;
const EXPORT_FILE_NAME: &str = "survey_data.xlsx";

/// Failures while converting between records and workbook bytes.
#[derive(Debug, thiserror::Error)]
pub enum SpreadsheetError {
    /// The workbook writer failed.
    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
    /// The workbook could not be parsed.
    #[error("failed to read workbook: {0}")]
    Read(#[from] calamine::XlsxError),
    /// The workbook contains no worksheet.
    #[error("workbook has no worksheet")]
    MissingSheet,
    /// The first row is not `Name`, `Gender`.
    #[error("unexpected header row {found:?}; expected [\"Name\", \"Gender\"]")]
    Header {
        /// Header cells as found.
        found: Vec<String>,
    },
    /// A data row does not hold a valid record.
    #[error("row {row}: {reason}")]
    Row {
        /// One-based spreadsheet row number.
        row: usize,
        /// Why the row was rejected.
        reason: String,
    },
    /// More records than a worksheet can hold.
    #[error("too many rows for one worksheet")]
    TooManyRows,
}

/// Encode `records` as an `.xlsx` workbook.
pub fn encode_records(records: &[SurveyRecord]) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    {
        let header = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string_with_format(0, NAME_COLUMN, NAME_HEADER, &header)?;
        worksheet.write_string_with_format(0, GENDER_COLUMN, GENDER_HEADER, &header)?;

        for (index, record) in records.iter().enumerate() {
            let row = index
                .checked_add(1)
                .and_then(|row| u32::try_from(row).ok())
                .ok_or(SpreadsheetError::TooManyRows)?;
            worksheet.write_string(row, NAME_COLUMN, record.name())?;
            worksheet.write_string(row, GENDER_COLUMN, record.gender().as_str())?;
        }
        worksheet.autofit();
    }
    Ok(workbook.save_to_buffer()?)
}

/// Decode an `.xlsx` workbook produced by [`encode_records`].
///
/// Fully blank rows are skipped.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<SurveyRecord>, SpreadsheetError> {
    let mut workbook: Xlsx<Cursor<&[u8]>> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::MissingSheet)??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let found: Vec<String> = header.iter().map(cell_text).collect();
    if found.iter().map(String::as_str).ne([NAME_HEADER, GENDER_HEADER]) {
        return Err(SpreadsheetError::Header { found });
    }

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let name = cells.first().map_or("", String::as_str);
        let gender = cells.get(1).map(String::as_str);
        let record = SurveyRecord::try_from_parts(name, gender).map_err(|err| {
            SpreadsheetError::Row {
                row: index + 2,
                reason: err.to_string(),
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => unescape_ooxml(text),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Undo the `_xHHHH_` escapes the writer applies to control characters and
/// to literal escape-shaped text (`_x005F_` stands for `_`).
fn unescape_ooxml(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((before, after)) = rest.split_once("_x") {
        decoded.push_str(before);
        match after.get(..5).and_then(escaped_char) {
            Some(ch) => {
                decoded.push(ch);
                rest = after.get(5..).unwrap_or_default();
            }
            None => {
                decoded.push_str("_x");
                rest = after;
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

fn escaped_char(candidate: &str) -> Option<char> {
    let hex = candidate.strip_suffix('_')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// [`SurveyExporter`] producing `survey_data.xlsx` downloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxSurveyExporter;

impl SurveyExporter for XlsxSurveyExporter {
    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn file_name(&self) -> &'static str {
        EXPORT_FILE_NAME
    }

    fn encode(&self, records: &[SurveyRecord]) -> Result<Vec<u8>, SurveyExportError> {
        encode_records(records).map_err(|err| SurveyExportError::encode(err.to_string()))
    }
}
