pub mod discover;
pub mod report;

use crate::api::ExtractorConfig;
use crate::error::{Result, TagcatError};
use crate::extraction::DEFAULT_SCAN_LIMIT;
use crate::schema::TagSchema;
use crate::types::{DetectionStrategy, Field, LocateMode};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for tagcat
#[derive(Parser, Debug)]
#[command(name = "tagcat")]
#[command(about = "Extract DICOM header fields from FUJI and DCMTK tag dumps")]
#[command(version)]
pub struct Cli {
    /// Directory searched recursively for tag dumps
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Extension of dump files
    #[arg(short, long, default_value = "txt")]
    pub ext: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Comma-separated columns to extract, in order (filename is always first)
    #[arg(long, value_delimiter = ',', value_name = "FIELDS")]
    pub fields: Vec<String>,

    /// Number of leading lines searched for a dialect marker
    #[arg(long, default_value_t = DEFAULT_SCAN_LIMIT)]
    pub scan_limit: usize,

    /// Test every line against every tag instead of stopping at the first match
    #[arg(long)]
    pub exhaustive: bool,

    /// Dialect detection strategy
    #[arg(long, default_value = "markers")]
    pub detect: DetectArg,

    /// Report DCMTK transfer syntax names as UIDs
    #[arg(long)]
    pub normalize_transfer_syntax: bool,

    /// Process files on all cores
    #[arg(short, long)]
    pub parallel: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Extraction settings selected on the command line
    ///
    /// # Errors
    ///
    /// Returns [`TagcatError::InvalidSchema`] if `--fields` names an unknown
    /// or repeated field.
    pub fn extractor_config(&self) -> Result<ExtractorConfig> {
        let locate_mode = if self.exhaustive {
            LocateMode::Exhaustive
        } else {
            LocateMode::Optimized
        };
        let mut config = ExtractorConfig::default()
            .with_scan_limit(self.scan_limit)
            .with_locate_mode(locate_mode)
            .with_detection(self.detect.clone().into())
            .with_transfer_syntax_normalization(self.normalize_transfer_syntax);

        if !self.fields.is_empty() {
            config = config.with_schema(self.schema()?)?;
        }
        Ok(config)
    }

    /// Schema from `--fields`, with `filename` moved to the front
    fn schema(&self) -> Result<TagSchema> {
        let mut fields = vec![Field::Filename];
        for name in &self.fields {
            let field = Field::from_name(name)
                .ok_or_else(|| TagcatError::InvalidSchema(format!("unknown field '{}'", name)))?;
            if field != Field::Filename {
                fields.push(field);
            }
        }
        TagSchema::new(fields)
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Text,
    /// Comma-separated values with a header row
    Csv,
    /// JSON format
    Json,
}

/// Dialect detection strategy
#[derive(Debug, Clone, ValueEnum)]
pub enum DetectArg {
    /// Banner strings in the first lines (FUJI wins ties)
    Markers,
    /// Ratio of `|` to `#` characters over the whole file
    CharRatio,
}

impl From<DetectArg> for DetectionStrategy {
    fn from(arg: DetectArg) -> Self {
        match arg {
            DetectArg::Markers => DetectionStrategy::Markers,
            DetectArg::CharRatio => DetectionStrategy::CharRatio,
        }
    }
}
