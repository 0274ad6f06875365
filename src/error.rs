//! Error types for docstore
//!
//! Provides a unified error type for all store operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::RawRecord;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for docstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Record not found: {}", .path.display())]
    NotFound { path: PathBuf },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A collection listing failed part-way; `records` holds every entry
    /// read before the failure.
    #[error("Read aborted after {} records: {source}", .records.len())]
    PartialRead {
        records: Vec<RawRecord>,
        #[source]
        source: Box<StoreError>,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl StoreError {
    pub(crate) fn collection_not_selected() -> Self {
        StoreError::Precondition("collection not selected".to_string())
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// True for `Precondition`
    pub fn is_precondition(&self) -> bool {
        matches!(self, StoreError::Precondition(_))
    }
}
