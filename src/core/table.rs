use crate::core::escape::escape_field;
use crate::core::line::parse_line;
use crate::core::row::{flatten_record, inflate_row, InflateOptions};
use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};

/// Decode behavior knobs for [`table_to_records`].
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub inflate: InflateOptions,
    /// When set, a data row with fewer cells than headers fails with
    /// `MalformedRow` instead of being padded.
    pub strict_rows: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            strict_rows: true,
            ..Self::default()
        }
    }

    /// Profile for the HTTP serving path: lenient rows, numeric id cells.
    pub fn serving() -> Self {
        Self {
            inflate: InflateOptions::serving(),
            strict_rows: false,
        }
    }
}

/// Splits CSV text into physical rows at LF/CRLF boundaries outside quotes,
/// so embedded newlines in quoted fields stay inside their row. Blank and
/// whitespace-only rows are dropped.
pub fn split_rows(text: &str) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in text.chars() {
        match c {
            // An escaped quote pair toggles twice and lands back where it
            // started, so a plain toggle is enough for splitting.
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '\n' if !in_quotes => {
                if current.ends_with('\r') {
                    current.pop();
                }
                rows.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    rows.push(current);

    rows.retain(|row| !row.trim().is_empty());
    rows
}

/// Decodes full CSV text into records.
///
/// The first non-blank row is the header row; header names are
/// whitespace-trimmed but otherwise opaque. Header-only or empty input
/// decodes to zero records.
pub fn table_to_records(csv_text: &str, options: &DecodeOptions) -> Result<Vec<Record>> {
    let rows = split_rows(csv_text);
    if rows.len() < 2 {
        return Ok(Vec::new());
    }

    let headers: Vec<String> = parse_line(&rows[0])
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::with_capacity(rows.len() - 1);
    for (i, row) in rows[1..].iter().enumerate() {
        let values = parse_line(row);
        if options.strict_rows && values.len() < headers.len() {
            return Err(EtlError::MalformedRow {
                line: i + 2,
                expected: headers.len(),
                actual: values.len(),
            });
        }
        records.push(inflate_row(&headers, &values, &options.inflate));
    }
    Ok(records)
}

/// Encodes records as CSV text: unescaped header line first, then one
/// escaped line per record, LF-joined with no trailing newline.
pub fn records_to_table(records: &[Record], headers: &[String]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.join(","));
    for record in records {
        let cells = flatten_record(record, headers);
        let escaped: Vec<String> = cells.iter().map(|c| escape_field(c)).collect();
        lines.push(escaped.join(","));
    }
    lines.join("\n")
}
