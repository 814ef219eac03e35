use crate::error::{Result, TagcatError};
use log::warn;
use std::path::Path;

/// One dump file's name and its text lines
///
/// Line terminators are stripped. Bytes that are not valid UTF-8 are
/// replaced rather than rejected, since older dumpers write Latin-1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpSource {
    /// File name without its directory
    pub filename: String,

    /// Dump text, one entry per line
    pub lines: Vec<String>,
}

impl DumpSource {
    /// Creates a source from already-split lines
    pub fn new(filename: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            filename: filename.into(),
            lines,
        }
    }

    /// Creates a source by splitting text into lines
    pub fn from_text(filename: impl Into<String>, text: &str) -> Self {
        Self::new(filename, text.lines().map(str::to_string).collect())
    }

    /// Reads a dump file
    ///
    /// # Errors
    ///
    /// Returns [`TagcatError::SourceRead`] if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| TagcatError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;

        let text = String::from_utf8_lossy(&bytes);
        if let std::borrow::Cow::Owned(_) = text {
            warn!("{} is not valid UTF-8, decoding lossily", path.display());
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::from_text(filename, &text))
    }
}
