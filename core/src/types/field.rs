use crate::schema::tags;
use dicom_core::Tag;
use std::fmt;

/// Logical metadata field extracted from a tag dump
///
/// Every field except [`Field::Filename`] is backed by a DICOM tag whose
/// dialect-specific rendering is used to find the field's line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub enum Field {
    Filename,
    AccessionNumber,
    Modality,
    SourceApplicationEntityTitle,
    StationName,
    InstitutionName,
    Manufacturer,
    ManufacturerModelName,
    TransferSyntaxUid,
}

impl Field {
    /// All fields, in the canonical column order
    pub const ALL: [Field; 9] = [
        Field::Filename,
        Field::AccessionNumber,
        Field::Modality,
        Field::SourceApplicationEntityTitle,
        Field::StationName,
        Field::InstitutionName,
        Field::Manufacturer,
        Field::ManufacturerModelName,
        Field::TransferSyntaxUid,
    ];

    /// Column header name
    pub fn name(&self) -> &'static str {
        match self {
            Field::Filename => "filename",
            Field::AccessionNumber => "accessionNumber",
            Field::Modality => "modality",
            Field::SourceApplicationEntityTitle => "sourceApplicationEntityTitle",
            Field::StationName => "stationName",
            Field::InstitutionName => "institutionName",
            Field::Manufacturer => "manufacturer",
            Field::ManufacturerModelName => "manufacturerModelName",
            Field::TransferSyntaxUid => "transferSyntaxUid",
        }
    }

    /// DICOM tag carrying this field, `None` for the filename
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Field::Filename => None,
            Field::AccessionNumber => Some(tags::ACCESSION_NUMBER),
            Field::Modality => Some(tags::MODALITY),
            Field::SourceApplicationEntityTitle => Some(tags::SOURCE_APPLICATION_ENTITY_TITLE),
            Field::StationName => Some(tags::STATION_NAME),
            Field::InstitutionName => Some(tags::INSTITUTION_NAME),
            Field::Manufacturer => Some(tags::MANUFACTURER),
            Field::ManufacturerModelName => Some(tags::MANUFACTURER_MODEL_NAME),
            Field::TransferSyntaxUid => Some(tags::TRANSFER_SYNTAX_UID),
        }
    }

    /// Whether the value comes from a line search rather than the input itself
    pub fn is_searchable(&self) -> bool {
        !matches!(self, Field::Filename)
    }

    /// Parses a field from its column header name (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
