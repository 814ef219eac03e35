use std::path::PathBuf;
use thiserror::Error;

/// Result type for tagcat operations
pub type Result<T> = std::result::Result<T, TagcatError>;

/// Error types for tagcat operations
///
/// Data-quality problems inside a dump (unknown dialect, missing tag,
/// malformed delimiters) are not represented here: they degrade to a
/// skipped file or an empty field.
#[derive(Error, Debug)]
pub enum TagcatError {
    /// A dump file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema or key map construction error
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Report rendering or serialization error
    #[error("Report error: {0}")]
    Report(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for TagcatError {
    fn from(e: serde_json::Error) -> Self {
        TagcatError::Report(format!("{}", e))
    }
}
