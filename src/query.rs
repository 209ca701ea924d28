//! Row filtering and search over a loaded [`Table`].

use std::collections::HashSet;

use crate::dataset::{COUNTRY_CODE_COLUMN, COUNTRY_NAME_COLUMN, PROCESS_NAME_COLUMN};
use crate::error::{DataError, DataResult};
use crate::types::Table;

/// Filter rows whose `column` cell equals `value`, case-insensitively.
///
/// Every cell is coerced to its display string before comparison, so numeric
/// cells match their textual form. Fails with a schema error if `column` is
/// absent. An empty result is a valid return; callers decide whether that is
/// a 404 (see [`ensure_non_empty`]).
pub fn filter_by_column(table: &Table, column: &str, value: &str) -> DataResult<Table> {
    let idx = table
        .index_of(column)
        .ok_or_else(|| DataError::schema(format!("Missing '{column}' column in dataset")))?;

    let needle = value.to_lowercase();
    Ok(table.filter_rows(|row| {
        row.get(idx)
            .is_some_and(|v| v.display_string().to_lowercase() == needle)
    }))
}

/// Filter rows by the two-letter ISO country code column.
pub fn filter_by_country(table: &Table, country_code: &str) -> DataResult<Table> {
    filter_by_column(table, COUNTRY_CODE_COLUMN, country_code)
}

/// Map an empty table to `NotFound`; pass a non-empty one through.
pub fn ensure_non_empty(table: Table) -> DataResult<Table> {
    if table.row_count() == 0 {
        return Err(DataError::not_found("No matching data found"));
    }
    Ok(table)
}

/// Free-text search: a priority-ordered OR over two columns.
///
/// Tries an exact case-insensitive match on the ISO country-code column
/// first; only if that is empty, the country display-name column. The first
/// non-empty result wins even when both columns could match. Fails with
/// `NotFound` if neither matches.
pub fn search(table: &Table, query: &str) -> DataResult<Table> {
    let iso_match = filter_by_column(table, COUNTRY_CODE_COLUMN, query)?;
    if iso_match.row_count() > 0 {
        return Ok(iso_match);
    }

    let name_match = filter_by_column(table, COUNTRY_NAME_COLUMN, query)?;
    if name_match.row_count() > 0 {
        return Ok(name_match);
    }

    Err(DataError::not_found("No matching data found"))
}

/// Result of a process-name search.
///
/// `NoMatch` is a sentinel, not an error: a prefix query that hits nothing
/// still answers 200 with a "no results" body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessNameSearch {
    /// Distinct matching names, in first-seen table order.
    Matched(Vec<String>),
    /// The prefix query matched no process name.
    NoMatch,
}

/// List distinct non-null process names, optionally prefix-filtered.
///
/// With a non-empty `query`, keeps names whose lowercase form starts with the
/// lowercase query. An absent (or empty) query returns all distinct names.
/// Names come back in first-seen order, not sorted.
pub fn search_process_names(table: &Table, query: Option<&str>) -> DataResult<ProcessNameSearch> {
    let idx = table.index_of(PROCESS_NAME_COLUMN).ok_or_else(|| {
        DataError::schema(format!("Missing '{PROCESS_NAME_COLUMN}' column in dataset"))
    })?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut names: Vec<String> = Vec::new();
    for row in &table.rows {
        match row.get(idx) {
            Some(v) if !v.is_null() => {
                let name = v.display_string();
                if seen.insert(name.clone()) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }

    match query {
        Some(q) if !q.is_empty() => {
            let q = q.to_lowercase();
            let filtered: Vec<String> = names
                .into_iter()
                .filter(|n| n.to_lowercase().starts_with(&q))
                .collect();
            if filtered.is_empty() {
                Ok(ProcessNameSearch::NoMatch)
            } else {
                Ok(ProcessNameSearch::Matched(filtered))
            }
        }
        _ => Ok(ProcessNameSearch::Matched(names)),
    }
}
