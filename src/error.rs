//! Error types for double_map

use thiserror::Error;

/// Result type alias for double_map operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in double_map operations
///
/// A lookup that finds nothing is not an error; it returns `None`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A trie level has no room for another distinct pair key.
    ///
    /// The store has no overflow path, so the insertion is abandoned.
    #[error("Trie level at depth {depth} is full ({capacity} entries)")]
    CapacityExceeded { depth: usize, capacity: usize },

    #[error("Invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this is the fatal level-capacity condition
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Error::CapacityExceeded { .. })
    }
}
