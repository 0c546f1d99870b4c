use std::path::PathBuf;
use thiserror::Error;

/// Result type for snapshot and report operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Error, Debug)]
pub enum ProtocolError {
    /// No snapshot has been written for this repository yet
    #[error("No pattern configuration found at {}", path.display())]
    MissingConfiguration { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot parsed but holds values the engine rejects
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
