//! Error types for loading trees and serving search requests.
//!
//! The searchers themselves never fail; these errors only come from I/O,
//! JSON handling and the document store.

use std::path::PathBuf;

/// Result type for conftree-search operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No document loaded")]
    NoDocument,

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
