use super::{Dialect, Field};
use crate::schema::TagSchema;

/// Extracted tag dump record
///
/// One value per [`Field`]; unresolved fields hold an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct DumpRecord {
    /// Dialect the source dump was written in
    #[cfg_attr(feature = "json", serde(skip))]
    pub dialect: Dialect,

    /// Source file name, taken from the input rather than the dump
    pub filename: String,

    /// Accession Number (0008,0050)
    pub accession_number: String,

    /// Modality (0008,0060)
    pub modality: String,

    /// Source Application Entity Title (0002,0016)
    pub source_application_entity_title: String,

    /// Station Name (0008,1010)
    pub station_name: String,

    /// Institution Name (0008,0080)
    pub institution_name: String,

    /// Manufacturer (0008,0070)
    pub manufacturer: String,

    /// Manufacturer's Model Name (0008,1090)
    pub manufacturer_model_name: String,

    /// Transfer Syntax UID (0002,0010)
    pub transfer_syntax_uid: String,
}

impl DumpRecord {
    /// Creates a record with every tag field empty
    pub fn new(filename: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            dialect,
            filename: filename.into(),
            accession_number: String::new(),
            modality: String::new(),
            source_application_entity_title: String::new(),
            station_name: String::new(),
            institution_name: String::new(),
            manufacturer: String::new(),
            manufacturer_model_name: String::new(),
            transfer_syntax_uid: String::new(),
        }
    }

    /// Returns the value stored for a field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Filename => &self.filename,
            Field::AccessionNumber => &self.accession_number,
            Field::Modality => &self.modality,
            Field::SourceApplicationEntityTitle => &self.source_application_entity_title,
            Field::StationName => &self.station_name,
            Field::InstitutionName => &self.institution_name,
            Field::Manufacturer => &self.manufacturer,
            Field::ManufacturerModelName => &self.manufacturer_model_name,
            Field::TransferSyntaxUid => &self.transfer_syntax_uid,
        }
    }

    /// Stores a value for a field
    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Filename => &mut self.filename,
            Field::AccessionNumber => &mut self.accession_number,
            Field::Modality => &mut self.modality,
            Field::SourceApplicationEntityTitle => &mut self.source_application_entity_title,
            Field::StationName => &mut self.station_name,
            Field::InstitutionName => &mut self.institution_name,
            Field::Manufacturer => &mut self.manufacturer,
            Field::ManufacturerModelName => &mut self.manufacturer_model_name,
            Field::TransferSyntaxUid => &mut self.transfer_syntax_uid,
        };
        *slot = value;
    }

    /// Returns the record as a row of cells in schema order
    pub fn to_row(&self, schema: &TagSchema) -> Vec<String> {
        schema
            .fields()
            .iter()
            .map(|field| self.get(*field).to_string())
            .collect()
    }

    /// Number of tag fields that resolved to a non-empty value
    pub fn resolved_count(&self) -> usize {
        Field::ALL
            .iter()
            .filter(|field| field.is_searchable() && !self.get(**field).is_empty())
            .count()
    }
}
