//! Process-wide table cache.
//!
//! The dataset is read-only at request time, so the cache is populated at
//! most once (single-flight on first access) and treated as immutable for
//! the rest of the process. A failed load is not cached: the next request
//! retries, so a dataset file dropped into place after startup is picked up.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use crate::error::{DataError, DataResult};
use crate::ingestion::load_table;
use crate::types::Table;

/// Lazily-loaded, shareable handle to the dataset table.
#[derive(Debug)]
pub struct TableCache {
    path: PathBuf,
    cell: OnceCell<Arc<Table>>,
}

impl TableCache {
    /// A cache that will load from `path` on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// A cache pre-populated with an in-memory table (used by tests).
    pub fn preloaded(table: Table) -> Self {
        Self {
            path: PathBuf::new(),
            cell: OnceCell::new_with(Some(Arc::new(table))),
        }
    }

    /// Path of the backing dataset file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The shared table, loading it on first call.
    ///
    /// Concurrent first calls are single-flight: exactly one load runs (on a
    /// blocking thread) and every caller gets the same `Arc`.
    pub async fn get(&self) -> DataResult<Arc<Table>> {
        self.cell
            .get_or_try_init(|| async {
                let path = self.path.clone();
                let table = tokio::task::spawn_blocking(move || load_table(&path))
                    .await
                    .map_err(|e| DataError::Io(std::io::Error::other(e)))??;
                info!(
                    path = %self.path.display(),
                    rows = table.row_count(),
                    columns = table.columns.len(),
                    "dataset loaded"
                );
                Ok(Arc::new(table))
            })
            .await
            .cloned()
    }
}
