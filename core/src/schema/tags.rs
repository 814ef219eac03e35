use crate::types::Dialect;
use dicom_core::Tag;

// File Meta Information Tags
pub const TRANSFER_SYNTAX_UID: Tag = Tag(0x0002, 0x0010);
pub const SOURCE_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0016);

// Study Identification Tags
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);
pub const MODALITY: Tag = Tag(0x0008, 0x0060);

// Device/Manufacturer Tags
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
pub const MANUFACTURER_MODEL_NAME: Tag = Tag(0x0008, 0x1090);
pub const STATION_NAME: Tag = Tag(0x0008, 0x1010);

// Institution/Site Tags
pub const INSTITUTION_NAME: Tag = Tag(0x0008, 0x0080);

/// Renders a tag the way a dialect prints it at the start of a tag line
///
/// - FUJI: `0008 0060`
/// - DCMTK: `(0008,0060)`
///
/// Returns `None` for [`Dialect::Unknown`], which has no line syntax.
pub fn search_key(dialect: Dialect, tag: Tag) -> Option<String> {
    match dialect {
        Dialect::Fuji => Some(format!("{:04x} {:04x}", tag.group(), tag.element())),
        Dialect::Dcmtk => Some(format!("({:04x},{:04x})", tag.group(), tag.element())),
        Dialect::Unknown => None,
    }
}
