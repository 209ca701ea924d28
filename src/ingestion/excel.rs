//! Spreadsheet loading through calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{DataError, DataResult};
use crate::types::{Table, Value};

/// Load the first sheet of a workbook into a [`Table`].
///
/// The first non-empty row is the header row; header cells are trimmed.
/// Every header cell defines a column, so rows keep the sheet's full width.
pub fn load_excel(path: impl AsRef<Path>) -> DataResult<Table> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DataError::schema("workbook has no sheets"))?;
    let range = workbook.worksheet_range(&sheet)?;

    table_from_range(&range)
}

fn table_from_range(range: &calamine::Range<Data>) -> DataResult<Table> {
    let header_row_idx = range
        .rows()
        .position(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .ok_or_else(|| DataError::schema("sheet has no non-empty rows (no header row found)"))?;

    let columns: Vec<String> = range
        .rows()
        .nth(header_row_idx)
        .unwrap_or_default()
        .iter()
        .map(|c| cell_to_header_string(c).trim().to_string())
        .collect();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx0, row) in range.rows().enumerate() {
        if idx0 <= header_row_idx {
            continue;
        }

        let mut out_row: Vec<Value> = Vec::with_capacity(columns.len());
        for col_idx in 0..columns.len() {
            let cell = row.get(col_idx).unwrap_or(&Data::Empty);
            out_row.push(convert_cell(cell));
        }
        rows.push(out_row);
    }

    Ok(Table::new(columns, rows))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::String(s) => Value::Utf8(s.clone()),
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => Value::Float64(*f),
        Data::Bool(b) => Value::Bool(*b),
        // Dates/durations carry no aggregation semantics here; keep the text.
        Data::DateTime(dt) => Value::Utf8(dt.to_string()),
        Data::DateTimeIso(s) => Value::Utf8(s.clone()),
        Data::DurationIso(s) => Value::Utf8(s.clone()),
        // Cell-level formula errors read as missing.
        Data::Error(_) => Value::Null,
    }
}
