//! CSV loading.
//!
//! Values are type-inferred per cell (integer, then float, else string) since
//! CSV carries no cell types; empty fields become [`Value::Null`].

use std::path::Path;

use crate::error::DataResult;
use crate::types::{Table, Value};

/// Load a headered CSV file into a [`Table`].
pub fn load_csv(path: impl AsRef<Path>) -> DataResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing reader.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> DataResult<Table> {
    let columns: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row: Vec<Value> = Vec::with_capacity(columns.len());
        for col_idx in 0..columns.len() {
            let raw = record.get(col_idx).unwrap_or("");
            row.push(infer_value(raw));
        }
        rows.push(row);
    }

    Ok(Table::new(columns, rows))
}

fn infer_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int64(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Float64(f);
    }
    Value::Utf8(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::load_csv_from_reader;
    use crate::types::Value;

    #[test]
    fn infers_cell_types_and_trims_headers() {
        let data = " id , name ,score\n1,Ada,98.5\n2,Grace,\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        let table = load_csv_from_reader(&mut rdr).unwrap();

        assert_eq!(table.columns, vec!["id", "name", "score"]);
        assert_eq!(table.rows[0][0], Value::Int64(1));
        assert_eq!(table.rows[0][2], Value::Float64(98.5));
        assert_eq!(table.rows[1][1], Value::Utf8("Grace".to_string()));
        assert_eq!(table.rows[1][2], Value::Null);
    }
}
