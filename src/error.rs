use thiserror::Error;

/// Convenience result type for dataset operations.
pub type DataResult<T> = Result<T, DataError>;

/// Error type shared across loading, querying, and aggregation.
///
/// The handler layer maps [`DataError::NotFound`] to HTTP 404 and everything
/// else to 500, with the error's display text as the response detail.
#[derive(Debug, Error)]
pub enum DataError {
    /// Missing source file or an empty result set on a route that requires rows.
    #[error("{message}")]
    NotFound { message: String },

    /// An expected column is absent from the table.
    #[error("{message}")]
    Schema { message: String },

    /// Spreadsheet parse failure.
    #[error("Error loading data: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV parse failure.
    #[error("Error loading data: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error (e.g. permission denied mid-read).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// A [`DataError::NotFound`] with the given detail message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// A [`DataError::Schema`] with the given detail message.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }
}
