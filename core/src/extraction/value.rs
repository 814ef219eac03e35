use crate::types::Dialect;
use log::debug;

/// Extracts a tag's value from the line located for it
///
/// An empty `line` means the tag was not found and yields an empty value.
/// A line missing the dialect's delimiters also yields an empty value;
/// extraction never fails.
///
/// # Rules
///
/// - DCMTK: text between the first `[` and the next `]`. Lines without a
///   bracket but with `=` (dcmdump's named-UID form) yield the trimmed
///   text between `=` and the `#` comment, or the end of the line.
/// - FUJI: text between the first pair of double quotes.
/// - Unknown: always empty.
///
/// # Example
///
/// ```
/// use tagcat_core::extraction::extract_value;
/// use tagcat_core::Dialect;
///
/// let line = "(0008,0060) CS [CT]         #   2, 1 Modality";
/// assert_eq!(extract_value(Dialect::Dcmtk, "(0008,0060)", line), "CT");
///
/// let line = "0008 0060 | modality       | CS |     1 | \"CR\"";
/// assert_eq!(extract_value(Dialect::Fuji, "0008 0060", line), "CR");
/// ```
pub fn extract_value(dialect: Dialect, key: &str, line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }

    let value = match dialect {
        Dialect::Dcmtk => extract_dcmtk_value(line),
        Dialect::Fuji => extract_fuji_value(line),
        Dialect::Unknown => None,
    };

    match value {
        Some(value) => value,
        None => {
            debug!(
                "{} line for {} has no value delimiters: {}",
                dialect,
                key,
                line.trim_end()
            );
            String::new()
        }
    }
}

/// Parses a dcmdump line: `[value]`, else `=value # comment`
fn extract_dcmtk_value(line: &str) -> Option<String> {
    if line.contains('[') {
        return between(line, '[', ']').map(str::to_string);
    }

    let (_, assigned) = line.split_once('=')?;
    let value = match assigned.split_once('#') {
        Some((value, _comment)) => value,
        None => assigned,
    };
    Some(value.trim().to_string())
}

/// Parses a FUJI table line: `"value"`
fn extract_fuji_value(line: &str) -> Option<String> {
    between(line, '"', '"').map(str::to_string)
}

/// Text strictly between the first `open` and the next `close` after it
fn between(line: &str, open: char, close: char) -> Option<&str> {
    let (_, rest) = line.split_once(open)?;
    let (inner, _) = rest.split_once(close)?;
    Some(inner)
}
