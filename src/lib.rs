//! `lca-data-api` serves a single tabular dataset of life-cycle-assessment
//! process records (keyed by ISO country code and process name) over a small
//! HTTP API.
//!
//! The dataset spreadsheet is loaded once into an in-memory [`types::Table`]
//! of tagged [`types::Value`]s; every request then maps to one column
//! filter, row search, or GWP100 aggregation over that immutable table.
//!
//! ## Modules
//!
//! - [`ingestion`]: spreadsheet/CSV loading into a [`types::Table`]
//! - [`types`]: tagged values and the in-memory table
//! - [`dataset`]: the fixed column vocabulary of the LCA dataset
//! - [`query`]: column filter, priority-ordered search, process-name search
//! - [`aggregate`]: per-country GWP100 sums, totals, and min/max stats
//! - [`cache`]: single-flight process-wide table cache
//! - [`server`]: axum routes and error-to-status mapping
//! - [`config`]: environment-driven server configuration
//! - [`error`]: the shared error taxonomy
//!
//! ## Example: query an in-memory table
//!
//! ```rust
//! use lca_data_api::dataset::{COUNTRY_CODE_COLUMN, COUNTRY_NAME_COLUMN, PROCESS_NAME_COLUMN};
//! use lca_data_api::query::filter_by_country;
//! use lca_data_api::types::{Table, Value};
//!
//! let table = Table::new(
//!     vec![
//!         COUNTRY_CODE_COLUMN.to_string(),
//!         COUNTRY_NAME_COLUMN.to_string(),
//!         PROCESS_NAME_COLUMN.to_string(),
//!     ],
//!     vec![vec![
//!         Value::Utf8("US".to_string()),
//!         Value::Utf8("United States".to_string()),
//!         Value::Utf8("propylene production".to_string()),
//!     ]],
//! );
//!
//! let us = filter_by_country(&table, "us").unwrap();
//! assert_eq!(us.row_count(), 1);
//! ```

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ingestion;
pub mod query;
pub mod server;
pub mod types;

pub use error::{DataError, DataResult};
