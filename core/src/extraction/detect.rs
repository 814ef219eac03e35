use crate::types::{DetectionStrategy, Dialect};
use log::debug;

/// Banner line printed by the FUJI dumper above its tag table
pub const FUJI_MARKER: &str = "Grp  Elmt | Description";

/// Section header printed by dcmdump before the file meta group
pub const DCMTK_MARKER: &str = "Dicom-Meta-Information-Header";

/// Number of leading lines inspected for a dialect marker
pub const DEFAULT_SCAN_LIMIT: usize = 5;

/// Detects a dump's dialect from marker strings in its first lines
///
/// Only the first `scan_limit` lines are inspected: both markers sit at
/// the top of a well-formed dump, and tag values further down may happen
/// to contain either string.
///
/// # Algorithm
///
/// 1. Scan the first `scan_limit` lines for [`FUJI_MARKER`] and [`DCMTK_MARKER`]
/// 2. FUJI marker found → FUJI (also when the DCMTK marker is present too)
/// 3. DCMTK marker found → DCMTK
/// 4. Otherwise → Unknown
pub fn detect_dialect<S: AsRef<str>>(lines: &[S], scan_limit: usize) -> Dialect {
    let mut is_fuji = false;
    let mut is_dcmtk = false;

    for line in lines.iter().take(scan_limit) {
        let line = line.as_ref();
        is_fuji |= line.contains(FUJI_MARKER);
        is_dcmtk |= line.contains(DCMTK_MARKER);
    }

    if is_fuji && is_dcmtk {
        debug!("Both dialect markers present, resolving to fuji");
    }

    if is_fuji {
        Dialect::Fuji
    } else if is_dcmtk {
        Dialect::Dcmtk
    } else {
        Dialect::Unknown
    }
}

/// Detects a dump's dialect by comparing `|` and `#` counts over all lines
///
/// FUJI tables separate columns with bars while dcmdump ends each tag line
/// with a `#` comment. Ties, including a dump with neither character, are
/// unknown.
pub fn detect_dialect_by_char_ratio<S: AsRef<str>>(lines: &[S]) -> Dialect {
    let (bars, hashes) = lines.iter().fold((0usize, 0usize), |(bars, hashes), line| {
        let line = line.as_ref();
        (
            bars + line.matches('|').count(),
            hashes + line.matches('#').count(),
        )
    });
    debug!("Character ratio: {} bars, {} hashes", bars, hashes);

    match bars.cmp(&hashes) {
        std::cmp::Ordering::Greater => Dialect::Fuji,
        std::cmp::Ordering::Less => Dialect::Dcmtk,
        std::cmp::Ordering::Equal => Dialect::Unknown,
    }
}

impl DetectionStrategy {
    /// Classifies a dump with this strategy
    ///
    /// `scan_limit` only applies to [`DetectionStrategy::Markers`].
    pub fn detect<S: AsRef<str>>(&self, lines: &[S], scan_limit: usize) -> Dialect {
        match self {
            DetectionStrategy::Markers => detect_dialect(lines, scan_limit),
            DetectionStrategy::CharRatio => detect_dialect_by_char_ratio(lines),
        }
    }
}
