use std::path::PathBuf;
use thiserror::Error;

/// Result type for repository writes
pub type Result<T> = std::result::Result<T, WriterError>;

#[derive(Error, Debug)]
pub enum WriterError {
    /// An external command ran but exited unsuccessfully
    #[error("`{command}` failed (exit code {}): {stderr}", code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The command could not be started at all
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A commit failed part way through a run
    #[error("Stopped after {created} commits: {source}")]
    Aborted {
        created: usize,
        #[source]
        source: Box<WriterError>,
    },
}

impl WriterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WriterError::Io {
            path: path.into(),
            source,
        }
    }

    /// The underlying failure, looking through `Aborted`
    pub fn root(&self) -> &WriterError {
        match self {
            WriterError::Aborted { source, .. } => source.root(),
            other => other,
        }
    }
}
