use std::fmt;

/// Textual convention a header dump was written in
///
/// Computed once per input file from the first lines of the dump and
/// never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// `gggg eeee | name | VR | len | "value"` lines
    Fuji,
    /// dcmdump style `(gggg,eeee) VR [value] # len, vm Name` lines
    Dcmtk,
    /// Neither dumper recognized; the file is not a tag dump
    Unknown,
}

impl Dialect {
    /// Returns whether this dialect is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, Dialect::Unknown)
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Dialect::Fuji => "fuji",
            Dialect::Dcmtk => "dcmtk",
            Dialect::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Strategy used to classify a dump's dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DetectionStrategy {
    /// Look for the dumpers' banner strings in the first lines.
    /// When both banners are present FUJI wins.
    #[default]
    Markers,

    /// Compare the number of `|` and `#` characters across the whole dump.
    /// More bars means FUJI, more hashes means DCMTK, a tie is unknown.
    CharRatio,
}

/// Tag line search strategy
///
/// Both modes return the same index; they differ only in cost profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocateMode {
    /// Scan once per key and stop at the first matching line
    #[default]
    Optimized,

    /// Single pass over every line, testing all keys on each
    Exhaustive,
}
