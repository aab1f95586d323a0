//! Error types for catalog loading.

use thiserror::Error;

/// Errors that can occur while loading the catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// A row could not be parsed.
    #[error("Failed to parse catalog: {0}")]
    Csv(#[from] csv::Error),
}
