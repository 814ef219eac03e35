//! Dialect detection, tag line location and value extraction

pub mod detect;
pub mod locate;
pub mod value;

pub use detect::{
    detect_dialect, detect_dialect_by_char_ratio, DCMTK_MARKER, DEFAULT_SCAN_LIMIT, FUJI_MARKER,
};
pub use locate::{
    find_tag_line, locate_tags, ShortCircuitLocator, SinglePassLocator, TagIndex, TagLocator,
};
pub use value::extract_value;
