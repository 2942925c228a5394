//! Error types for the InternTrack store.
//!
//! The record services are deliberately quiet: unreadable stored data falls
//! back to defaults, and missing ids or incomplete input are no-ops. What is
//! left here are failures of the durable substrate itself and malformed
//! arguments arriving from the view layer.

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage key that does not map to a relative path inside the data directory
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Category filter that is neither "all" nor a known category
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding in-process state was poisoned by a panicking holder
    #[error("Storage lock poisoned")]
    Poisoned,
}
