//! Transfer syntax naming
//!
//! dcmdump prints well-known transfer syntaxes by name (`UI =LittleEndianExplicit`)
//! while FUJI dumps carry the raw UID. These helpers map between the two.

use dicom::encoding::transfer_syntax::TransferSyntaxIndex;
use dicom::transfer_syntax::TransferSyntaxRegistry;

/// dcmdump transfer syntax names and their UIDs
///
/// The trailing short names are spellings found in older dump archives.
const DCMTK_NAMES: &[(&str, &str)] = &[
    ("LittleEndianImplicit", "1.2.840.10008.1.2"),
    ("LittleEndianExplicit", "1.2.840.10008.1.2.1"),
    ("DeflatedLittleEndianExplicit", "1.2.840.10008.1.2.1.99"),
    ("BigEndianExplicit", "1.2.840.10008.1.2.2"),
    ("JPEGBaseline", "1.2.840.10008.1.2.4.50"),
    ("JPEGExtended:Process2+4", "1.2.840.10008.1.2.4.51"),
    ("JPEGLossless:Non-hierarchical:Process14", "1.2.840.10008.1.2.4.57"),
    (
        "JPEGLossless:Non-hierarchical-1stOrderPrediction",
        "1.2.840.10008.1.2.4.70",
    ),
    ("JPEGLSLossless", "1.2.840.10008.1.2.4.80"),
    ("JPEGLSLossy", "1.2.840.10008.1.2.4.81"),
    ("JPEG2000LosslessOnly", "1.2.840.10008.1.2.4.90"),
    ("JPEG2000", "1.2.840.10008.1.2.4.91"),
    ("RLELossless", "1.2.840.10008.1.2.5"),
    ("JPEGBaselineProcess1", "1.2.840.10008.1.2.4.50"),
    ("JPEGBaselineProcess2", "1.2.840.10008.1.2.4.51"),
    ("JPEGLossless14", "1.2.840.10008.1.2.4.57"),
    ("JPEGLossless14FOP", "1.2.840.10008.1.2.4.70"),
    ("JPEG2000Lossless", "1.2.840.10008.1.2.4.90"),
    ("RunLengthEncoding", "1.2.840.10008.1.2.5"),
];

/// Looks up the UID for a dcmdump transfer syntax name
pub fn uid_for_dcmtk_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    DCMTK_NAMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, uid)| *uid)
}

/// Rewrites a dcmdump transfer syntax name as its UID
///
/// Values that are already UIDs, or names not in the table, are returned
/// trimmed but otherwise unchanged.
pub fn normalize_transfer_syntax(value: &str) -> String {
    uid_for_dcmtk_name(value)
        .map(str::to_string)
        .unwrap_or_else(|| value.trim().to_string())
}

/// Human-readable transfer syntax name for a UID or a dcmdump name
///
/// Returns `None` if the value does not resolve to a transfer syntax
/// known to the registry.
pub fn transfer_syntax_name(value: &str) -> Option<String> {
    let value = value
        .trim_end_matches(|c: char| c.is_whitespace() || c == '\0')
        .trim_start();
    let uid = uid_for_dcmtk_name(value).unwrap_or(value);
    TransferSyntaxRegistry.get(uid).map(|ts| ts.name().to_string())
}
