//! GWP100 aggregation over the country-filtered row subset.
//!
//! Both variants share the same pipeline: filter rows by ISO country code
//! (`NotFound` when empty), coerce each of the five GWP sub-metric cells to
//! f64 with invalid/missing values zeroed, sum per column, then present
//! everything rounded to two decimals (half away from zero, identical in
//! both variants).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::{COUNTRY_NAME_COLUMN, GWP_COLUMNS};
use crate::error::{DataError, DataResult};
use crate::query::{ensure_non_empty, filter_by_country};
use crate::types::{Table, Value};

/// Total GWP100 for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GwpAggregate {
    /// Country display name from the first matching row (not uppercased).
    pub country: String,
    /// Sum of the five per-column sums, rounded to two decimals.
    #[serde(rename = "total_GWP100")]
    pub total_gwp100: f64,
}

/// Total GWP100 plus per-column sums and their min/max.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GwpAggregateStats {
    /// Country display name from the first matching row (not uppercased).
    pub country: String,
    /// Sum of the five per-column sums, rounded to two decimals.
    #[serde(rename = "total_GWP100")]
    pub total_gwp100: f64,
    /// Minimum among the five per-column sums (not among row values).
    #[serde(rename = "min_GWP100")]
    pub min_gwp100: f64,
    /// Maximum among the five per-column sums (not among row values).
    #[serde(rename = "max_GWP100")]
    pub max_gwp100: f64,
    /// Per-column sums, each rounded to two decimals.
    #[serde(rename = "total_GWP100_by_column")]
    pub total_gwp100_by_column: BTreeMap<String, f64>,
}

/// Sum the five GWP columns for `country_code` and report the total.
pub fn aggregate(table: &Table, country_code: &str) -> DataResult<GwpAggregate> {
    let rows = ensure_non_empty(filter_by_country(table, country_code)?)?;
    let sums = gwp_column_sums(&rows)?;
    let total: f64 = sums.iter().map(|(_, v)| v).sum();

    Ok(GwpAggregate {
        country: representative_country(&rows)?,
        total_gwp100: round2(total),
    })
}

/// Like [`aggregate`], with per-column sums and min/max among those sums.
pub fn aggregate_with_stats(table: &Table, country_code: &str) -> DataResult<GwpAggregateStats> {
    let rows = ensure_non_empty(filter_by_country(table, country_code)?)?;
    let sums = gwp_column_sums(&rows)?;

    let total: f64 = sums.iter().map(|(_, v)| v).sum();
    // Min/max are taken over the raw sums, then rounded like everything else.
    let min = sums.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = sums
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(GwpAggregateStats {
        country: representative_country(&rows)?,
        total_gwp100: round2(total),
        min_gwp100: round2(min),
        max_gwp100: round2(max),
        total_gwp100_by_column: sums.into_iter().map(|(k, v)| (k, round2(v))).collect(),
    })
}

/// Per-column f64 sums of the five GWP columns, in [`GWP_COLUMNS`] order.
fn gwp_column_sums(rows: &Table) -> DataResult<Vec<(String, f64)>> {
    GWP_COLUMNS
        .iter()
        .map(|col| {
            let idx = rows
                .index_of(col)
                .ok_or_else(|| DataError::schema(format!("Missing '{col}' column in dataset")))?;
            let sum: f64 = rows
                .rows
                .iter()
                .map(|row| row.get(idx).map_or(0.0, Value::to_f64_lossy))
                .sum();
            Ok(((*col).to_string(), sum))
        })
        .collect()
}

fn representative_country(rows: &Table) -> DataResult<String> {
    let idx = rows.index_of(COUNTRY_NAME_COLUMN).ok_or_else(|| {
        DataError::schema(format!("Missing '{COUNTRY_NAME_COLUMN}' column in dataset"))
    })?;
    // Callers guarantee at least one row via ensure_non_empty.
    Ok(rows
        .rows
        .first()
        .and_then(|row| row.get(idx))
        .map(Value::display_string)
        .unwrap_or_default())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
