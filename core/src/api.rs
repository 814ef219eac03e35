use crate::error::{Result, TagcatError};
use crate::extraction::{extract_value, DEFAULT_SCAN_LIMIT};
use crate::schema::{normalize_transfer_syntax, DialectKeyMap, TagSchema};
use crate::types::{DetectionStrategy, Dialect, DumpRecord, Field, LocateMode};
use log::{debug, info};

/// Configuration for tag dump extraction
///
/// Holds the schema, both dialects' key maps and the detection and
/// search settings. The default extracts all fields, detects by marker
/// over the first 5 lines and uses the optimized search.
///
/// # Example
///
/// ```
/// use tagcat_core::{ExtractorConfig, Field, LocateMode, TagSchema};
///
/// let schema = TagSchema::new(vec![Field::Filename, Field::Modality]).unwrap();
/// let config = ExtractorConfig::default()
///     .with_schema(schema)
///     .unwrap()
///     .with_locate_mode(LocateMode::Exhaustive)
///     .with_scan_limit(10);
///
/// assert_eq!(config.scan_limit, 10);
/// assert_eq!(config.schema().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    schema: TagSchema,
    fuji: DialectKeyMap,
    dcmtk: DialectKeyMap,

    /// Number of leading lines inspected by marker detection
    pub scan_limit: usize,

    /// Tag line search strategy
    pub locate_mode: LocateMode,

    /// Dialect detection strategy
    pub detection: DetectionStrategy,

    /// Rewrite dcmdump transfer syntax names as UIDs
    pub normalize_transfer_syntax: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        let schema = TagSchema::default();
        let fuji = DialectKeyMap::from_tags(&schema, Dialect::Fuji);
        let dcmtk = DialectKeyMap::from_tags(&schema, Dialect::Dcmtk);
        Self {
            schema,
            fuji,
            dcmtk,
            scan_limit: DEFAULT_SCAN_LIMIT,
            locate_mode: LocateMode::default(),
            detection: DetectionStrategy::default(),
            normalize_transfer_syntax: false,
        }
    }
}

impl ExtractorConfig {
    /// Replaces the schema and derives both key maps from it
    ///
    /// # Errors
    ///
    /// Returns an error if a key map cannot be derived for the schema.
    pub fn with_schema(mut self, schema: TagSchema) -> Result<Self> {
        self.fuji = DialectKeyMap::for_dialect(&schema, Dialect::Fuji)?;
        self.dcmtk = DialectKeyMap::for_dialect(&schema, Dialect::Dcmtk)?;
        self.schema = schema;
        Ok(self)
    }

    /// Replaces both key maps with explicit ones
    ///
    /// # Errors
    ///
    /// Returns [`TagcatError::InvalidSchema`] if a map belongs to the wrong
    /// dialect or does not cover the schema's searchable fields.
    pub fn with_key_maps(mut self, fuji: DialectKeyMap, dcmtk: DialectKeyMap) -> Result<Self> {
        for (map, dialect) in [(&fuji, Dialect::Fuji), (&dcmtk, Dialect::Dcmtk)] {
            if map.dialect() != dialect {
                return Err(TagcatError::InvalidSchema(format!(
                    "expected {} key map, found {}",
                    dialect,
                    map.dialect()
                )));
            }
            let covered = map.iter().map(|(field, _)| field).eq(self.schema.searchable());
            if !covered {
                return Err(TagcatError::InvalidSchema(format!(
                    "{} key map does not match the schema",
                    dialect
                )));
            }
        }
        self.fuji = fuji;
        self.dcmtk = dcmtk;
        Ok(self)
    }

    /// Sets the number of lines inspected by marker detection
    pub fn with_scan_limit(mut self, scan_limit: usize) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    /// Sets the tag line search strategy
    pub fn with_locate_mode(mut self, mode: LocateMode) -> Self {
        self.locate_mode = mode;
        self
    }

    /// Sets the dialect detection strategy
    pub fn with_detection(mut self, detection: DetectionStrategy) -> Self {
        self.detection = detection;
        self
    }

    /// Enables or disables transfer syntax name normalization
    pub fn with_transfer_syntax_normalization(mut self, enabled: bool) -> Self {
        self.normalize_transfer_syntax = enabled;
        self
    }

    /// Field schema
    pub fn schema(&self) -> &TagSchema {
        &self.schema
    }

    /// Key map for a dialect, `None` for [`Dialect::Unknown`]
    pub fn key_map(&self, dialect: Dialect) -> Option<&DialectKeyMap> {
        match dialect {
            Dialect::Fuji => Some(&self.fuji),
            Dialect::Dcmtk => Some(&self.dcmtk),
            Dialect::Unknown => None,
        }
    }
}

/// Assembles one record per tag dump
///
/// For each dump: detect the dialect, pick that dialect's key map, locate
/// the line for every key, extract each value and fill the record in
/// schema order. Dumps of unknown dialect produce no record.
///
/// # Example
///
/// ```
/// use tagcat_core::{Dialect, TagDumpExtractor};
///
/// let lines = [
///     "# Dicom-File-Format",
///     "# Dicom-Meta-Information-Header",
///     "(0008,0050) SH [ACC42]      #   6, 1 AccessionNumber",
///     "(0008,0060) CS [CT]         #   2, 1 Modality",
/// ];
///
/// let extractor = TagDumpExtractor::default();
/// let record = extractor.extract("ct_dump.txt", &lines).unwrap();
///
/// assert_eq!(record.dialect, Dialect::Dcmtk);
/// assert_eq!(record.filename, "ct_dump.txt");
/// assert_eq!(record.accession_number, "ACC42");
/// assert_eq!(record.modality, "CT");
/// assert_eq!(record.station_name, "");
///
/// assert!(extractor.extract("notes.txt", &["shopping list"]).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TagDumpExtractor {
    config: ExtractorConfig,
}

impl TagDumpExtractor {
    /// Creates an extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extraction configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Classifies a dump with the configured detection strategy
    pub fn detect<S: AsRef<str>>(&self, lines: &[S]) -> Dialect {
        self.config.detection.detect(lines, self.config.scan_limit)
    }

    /// Extracts a record from the lines of one dump
    ///
    /// Returns `None` when the dump's dialect is not recognized. Missing
    /// tags and malformed lines leave the affected fields empty.
    pub fn extract<S: AsRef<str>>(&self, filename: &str, lines: &[S]) -> Option<DumpRecord> {
        let dialect = self.detect(lines);
        let key_map = match self.config.key_map(dialect) {
            Some(map) => map,
            None => {
                info!("Not a tag dump: {}", filename);
                return None;
            }
        };
        debug!("{} detected as {}", filename, dialect);

        let keys = key_map.keys();
        let index = self.config.locate_mode.locate(&keys, lines);

        let mut record = DumpRecord::new(filename, dialect);
        for (tag_num, (field, key)) in key_map.iter().enumerate() {
            if !index.is_found(key) {
                debug!("tag_{:02} {} not found in {}", tag_num + 1, key, filename);
            }
            let line = index.line(key);
            let mut value = extract_value(dialect, key, line);
            if field == Field::TransferSyntaxUid && self.config.normalize_transfer_syntax {
                value = normalize_transfer_syntax(&value);
            }
            debug!(
                "tag_{:02} {:<28} {:<12} -> {:?}",
                tag_num + 1,
                field.name(),
                key,
                value
            );
            record.set(field, value);
        }

        debug!(
            "{}: {} of {} tags resolved",
            filename,
            record.resolved_count(),
            key_map.len()
        );
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FUJI_DUMP: &[&str] = &[
        "Image: CR_0001.dcm",
        "Grp  Elmt | Description                     | VR | Len   | Value",
        "---- ---- | ------------------------------- | -- | ----- | -----",
        "0002 0016 | sourceApplicationEntityTitle    | AE |     8 | \"FCR_CSL\"",
        "0008 0050 | accessionNumber                 | SH |     6 | \"A10001\"",
        "0008 0060 | modality                        | CS |     2 | \"CR\"",
        "0008 0070 | manufacturer                    | LO |     4 | \"FUJIFILM\"",
        "0008 0080 | institutionName                 | LO |    14 | \"Mercy Hospital\"",
        "0008 1010 | stationName                     | SH |     6 | \"CR_RM2\"",
        "0008 1090 | manufacturerModelName           | LO |     6 | \"5000MA\"",
    ];

    const DCMTK_DUMP: &[&str] = &[
        "",
        "# Dicom-File-Format",
        "",
        "# Dicom-Meta-Information-Header",
        "# Used TransferSyntax: Little Endian Explicit",
        "(0002,0010) UI =LittleEndianExplicit                   #  20, 1 TransferSyntaxUID",
        "(0002,0016) AE [STORESCU]                              #   8, 1 SourceApplicationEntityTitle",
        "",
        "# Dicom-Data-Set",
        "(0008,0050) SH [ACC2001]                               #   8, 1 AccessionNumber",
        "(0008,0060) CS [CT]                                    #   2, 1 Modality",
        "(0008,0070) LO [SIEMENS]                               #   8, 1 Manufacturer",
        "(0008,0080) LO [City Clinic]                           #  12, 1 InstitutionName",
        "(0008,1010) SH [CTAWP01]                               #   8, 1 StationName",
        "(0008,1090) LO [SOMATOM]                               #   8, 1 ManufacturersModelName",
    ];

    #[test]
    fn test_extract_fuji() {
        let record = TagDumpExtractor::default()
            .extract("fuji.txt", FUJI_DUMP)
            .unwrap();

        assert_eq!(record.dialect, Dialect::Fuji);
        assert_eq!(record.filename, "fuji.txt");
        assert_eq!(record.accession_number, "A10001");
        assert_eq!(record.modality, "CR");
        assert_eq!(record.source_application_entity_title, "FCR_CSL");
        assert_eq!(record.station_name, "CR_RM2");
        assert_eq!(record.institution_name, "Mercy Hospital");
        assert_eq!(record.manufacturer, "FUJIFILM");
        assert_eq!(record.manufacturer_model_name, "5000MA");
        // FUJI dumps commonly lack the transfer syntax line
        assert_eq!(record.transfer_syntax_uid, "");
        assert_eq!(record.resolved_count(), 7);
    }

    #[test]
    fn test_extract_dcmtk() {
        let record = TagDumpExtractor::default()
            .extract("dcmtk.txt", DCMTK_DUMP)
            .unwrap();

        assert_eq!(record.dialect, Dialect::Dcmtk);
        assert_eq!(record.accession_number, "ACC2001");
        assert_eq!(record.modality, "CT");
        assert_eq!(record.source_application_entity_title, "STORESCU");
        assert_eq!(record.station_name, "CTAWP01");
        assert_eq!(record.institution_name, "City Clinic");
        assert_eq!(record.manufacturer, "SIEMENS");
        assert_eq!(record.manufacturer_model_name, "SOMATOM");
        assert_eq!(record.transfer_syntax_uid, "LittleEndianExplicit");
    }

    #[test]
    fn test_transfer_syntax_normalization() {
        let config = ExtractorConfig::default().with_transfer_syntax_normalization(true);
        let record = TagDumpExtractor::new(config)
            .extract("dcmtk.txt", DCMTK_DUMP)
            .unwrap();
        assert_eq!(record.transfer_syntax_uid, "1.2.840.10008.1.2.1");
    }

    #[test]
    fn test_unknown_dialect_yields_no_record() {
        let lines = ["Meeting notes", "(0008,0060) CS [CT]"];
        assert!(TagDumpExtractor::default().extract("notes.txt", &lines).is_none());
    }

    #[test]
    fn test_missing_tag_leaves_other_fields_intact() {
        let lines: Vec<&str> = DCMTK_DUMP
            .iter()
            .copied()
            .filter(|line| !line.starts_with("(0008,0060)"))
            .collect();
        let record = TagDumpExtractor::default()
            .extract("partial.txt", &lines)
            .unwrap();
        assert_eq!(record.modality, "");
        assert_eq!(record.accession_number, "ACC2001");
        assert_eq!(record.manufacturer, "SIEMENS");
        assert_eq!(record.resolved_count(), 7);
    }

    #[test]
    fn test_malformed_line_only_affects_its_field() {
        let mut lines = FUJI_DUMP.to_vec();
        lines[5] = "0008 0060 | modality | CS | 2 | CR";
        let record = TagDumpExtractor::default()
            .extract("broken.txt", &lines)
            .unwrap();
        assert_eq!(record.modality, "");
        assert_eq!(record.accession_number, "A10001");
        assert_eq!(record.station_name, "CR_RM2");
    }

    #[test]
    fn test_extract_is_idempotent() {
        let extractor = TagDumpExtractor::default();
        let first = extractor.extract("dcmtk.txt", DCMTK_DUMP);
        let second = extractor.extract("dcmtk.txt", DCMTK_DUMP);
        assert_eq!(first, second);
    }

    #[test]
    fn test_exhaustive_mode_matches_optimized() {
        let optimized = TagDumpExtractor::default();
        let exhaustive = TagDumpExtractor::new(
            ExtractorConfig::default().with_locate_mode(LocateMode::Exhaustive),
        );
        for dump in [FUJI_DUMP, DCMTK_DUMP] {
            assert_eq!(
                optimized.extract("x.txt", dump),
                exhaustive.extract("x.txt", dump)
            );
        }
    }

    #[test]
    fn test_reduced_schema() {
        let schema = TagSchema::new(vec![Field::Filename, Field::Modality]).unwrap();
        let config = ExtractorConfig::default().with_schema(schema).unwrap();
        assert_eq!(config.key_map(Dialect::Fuji).unwrap().len(), 1);

        let record = TagDumpExtractor::new(config)
            .extract("fuji.txt", FUJI_DUMP)
            .unwrap();
        assert_eq!(record.modality, "CR");
        // Fields outside the schema are never searched
        assert_eq!(record.accession_number, "");
    }

    #[test]
    fn test_custom_key_maps() {
        let schema = TagSchema::new(vec![Field::Filename, Field::Modality]).unwrap();
        let fuji = DialectKeyMap::new(&schema, Dialect::Fuji, vec![(Field::Modality, "| modality")])
            .unwrap();
        let dcmtk =
            DialectKeyMap::new(&schema, Dialect::Dcmtk, vec![(Field::Modality, "Modality")])
                .unwrap();
        let config = ExtractorConfig::default()
            .with_schema(schema)
            .unwrap()
            .with_key_maps(fuji, dcmtk)
            .unwrap();

        let record = TagDumpExtractor::new(config)
            .extract("dcmtk.txt", DCMTK_DUMP)
            .unwrap();
        assert_eq!(record.modality, "CT");
    }

    #[test]
    fn test_key_maps_must_match_dialect() {
        let schema = TagSchema::default();
        let fuji = DialectKeyMap::for_dialect(&schema, Dialect::Fuji).unwrap();
        let result = ExtractorConfig::default().with_key_maps(fuji.clone(), fuji);
        assert!(matches!(result, Err(TagcatError::InvalidSchema(_))));
    }

    #[test]
    fn test_key_maps_must_match_schema() {
        let reduced = TagSchema::new(vec![Field::Filename, Field::Modality]).unwrap();
        let fuji = DialectKeyMap::for_dialect(&reduced, Dialect::Fuji).unwrap();
        let dcmtk = DialectKeyMap::for_dialect(&reduced, Dialect::Dcmtk).unwrap();
        assert!(ExtractorConfig::default().with_key_maps(fuji, dcmtk).is_err());
    }

    #[test]
    fn test_scan_limit_controls_detection() {
        let extractor = TagDumpExtractor::new(ExtractorConfig::default().with_scan_limit(3));
        // DCMTK marker sits on the fourth line
        assert_eq!(extractor.detect(DCMTK_DUMP), Dialect::Unknown);
        assert_eq!(TagDumpExtractor::default().detect(DCMTK_DUMP), Dialect::Dcmtk);
    }
}
