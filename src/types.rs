//! Core data model: tagged cell values and the in-memory [`Table`].
//!
//! The dataset's columns are not known at compile time (the spreadsheet's
//! header row defines them), so rows hold tagged [`Value`]s rather than a
//! fixed typed record. Column names are whitespace-trimmed at load time and
//! all rows share the table's column set.

use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// A single tagged value in a [`Table`] cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty cell.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String form used for case-insensitive filter comparisons.
    ///
    /// Integral floats render without a fractional part so that a column
    /// upcast from integer to float still matches its original text.
    pub fn display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Value::Bool(b) => b.to_string(),
            Value::Utf8(s) => s.clone(),
        }
    }

    /// Numeric coercion for aggregation: invalid, missing, or non-numeric
    /// values become `0.0`.
    pub fn to_f64_lossy(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Int64(v) => *v as f64,
            Value::Float64(f) => *f,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Utf8(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Float64(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Utf8(s) => serializer.serialize_str(s),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as `columns`.
/// Immutable once loaded; all query operations return new tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Ordered, trimmed column names.
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from column names and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the original column set.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Upcast columns holding a mix of integers and floats to `Float64`.
    ///
    /// Mirrors the most-specific-common-type coercion applied to the source
    /// spreadsheet: a column with both `1` and `2.5` becomes all-float.
    pub fn normalize_column_types(&mut self) {
        for col in 0..self.columns.len() {
            let mut has_int = false;
            let mut has_float = false;
            for row in &self.rows {
                match row.get(col) {
                    Some(Value::Int64(_)) => has_int = true,
                    Some(Value::Float64(_)) => has_float = true,
                    _ => {}
                }
            }
            if has_int && has_float {
                for row in &mut self.rows {
                    if let Some(cell) = row.get_mut(col) {
                        if let Value::Int64(v) = *cell {
                            *cell = Value::Float64(v as f64);
                        }
                    }
                }
            }
        }
    }

    /// Project all rows as JSON objects keyed by column name.
    pub fn rows_to_json(&self) -> Vec<JsonValue> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::with_capacity(self.columns.len());
                for (name, value) in self.columns.iter().zip(row.iter()) {
                    obj.insert(
                        name.clone(),
                        serde_json::to_value(value).unwrap_or(JsonValue::Null),
                    );
                }
                JsonValue::Object(obj)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Table, Value};

    fn mixed_table() -> Table {
        Table::new(
            vec!["id".to_string(), "score".to_string()],
            vec![
                vec![Value::Int64(1), Value::Int64(10)],
                vec![Value::Int64(2), Value::Float64(2.5)],
                vec![Value::Int64(3), Value::Null],
            ],
        )
    }

    #[test]
    fn normalize_upcasts_mixed_int_float_columns() {
        let mut t = mixed_table();
        t.normalize_column_types();

        // score had both Int64 and Float64: all numerics become floats.
        assert_eq!(t.rows[0][1], Value::Float64(10.0));
        assert_eq!(t.rows[1][1], Value::Float64(2.5));
        assert_eq!(t.rows[2][1], Value::Null);
        // id was all-integer: untouched.
        assert_eq!(t.rows[0][0], Value::Int64(1));
    }

    #[test]
    fn display_string_renders_integral_floats_without_fraction() {
        assert_eq!(Value::Float64(10.0).display_string(), "10");
        assert_eq!(Value::Float64(2.5).display_string(), "2.5");
        assert_eq!(Value::Utf8("US".to_string()).display_string(), "US");
        assert_eq!(Value::Null.display_string(), "");
    }

    #[test]
    fn to_f64_lossy_zeroes_invalid_values() {
        assert_eq!(Value::Utf8("n/a".to_string()).to_f64_lossy(), 0.0);
        assert_eq!(Value::Utf8(" 1.5 ".to_string()).to_f64_lossy(), 1.5);
        assert_eq!(Value::Null.to_f64_lossy(), 0.0);
        assert_eq!(Value::Int64(3).to_f64_lossy(), 3.0);
    }

    #[test]
    fn filter_rows_preserves_columns_and_input() {
        let t = mixed_table();
        let id_idx = t.index_of("id").unwrap();
        let out = t.filter_rows(|row| matches!(row.get(id_idx), Some(Value::Int64(v)) if *v > 1));

        assert_eq!(out.columns, t.columns);
        assert_eq!(out.row_count(), 2);
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn rows_to_json_keys_by_column_and_maps_null() {
        let t = mixed_table();
        let json = t.rows_to_json();
        assert_eq!(json.len(), 3);
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[1]["score"], 2.5);
        assert!(json[2]["score"].is_null());
    }
}
