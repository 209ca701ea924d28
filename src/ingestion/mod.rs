//! Table loading: spreadsheet (or CSV) file into an in-memory [`Table`].
//!
//! Most callers should use [`load_table`], which:
//!
//! - fails with [`DataError::NotFound`] if the source file is absent
//! - infers the source format from the file extension
//! - reads the first sheet only, taking the first non-empty row as the
//!   header row (header cells whitespace-trimmed)
//! - tags every cell as a [`crate::types::Value`]
//! - upcasts mixed integer/float columns to float
//!
//! Loading is deterministic for an unchanged file; repeated loads yield
//! value-equal (not identity-equal) tables.

pub mod csv;
pub mod excel;

use std::path::Path;

use crate::error::{DataError, DataResult};
use crate::types::Table;

/// Supported source formats, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Spreadsheet/workbook formats read through calamine.
    Excel,
    /// Comma-separated values.
    Csv,
}

impl TableFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    fn from_path(path: &Path) -> DataResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| DataError::schema(format!(
                "cannot infer source format: path has no extension ({})",
                path.display()
            )))?;

        Self::from_extension(ext).ok_or_else(|| {
            DataError::schema(format!(
                "cannot infer source format from extension '{ext}' ({})",
                path.display()
            ))
        })
    }
}

/// Load the dataset file at `path` into a [`Table`].
pub fn load_table(path: impl AsRef<Path>) -> DataResult<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::not_found("File not found in uploads folder"));
    }

    let mut table = match TableFormat::from_path(path)? {
        TableFormat::Excel => excel::load_excel(path)?,
        TableFormat::Csv => csv::load_csv(path)?,
    };
    table.normalize_column_types();
    Ok(table)
}
