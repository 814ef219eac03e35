use super::OutputFormat;
use crate::batch::{BatchOutcome, BatchSummary};
use crate::error::Result;
use crate::schema::transfer_syntax_name;
use crate::types::{Field, Table};
use std::collections::BTreeSet;
use std::fmt;

/// Renders a batch outcome in the requested format
///
/// # Errors
///
/// Returns [`TagcatError::Report`](crate::error::TagcatError::Report) if JSON is requested without the
/// `json` feature, or if CSV or JSON serialization fails.
pub fn render(outcome: &BatchOutcome, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(TextReport::new(&outcome.table, &outcome.summary).to_string()),
        OutputFormat::Csv => CsvReport::new(&outcome.table).to_csv(),
        OutputFormat::Json => render_json(outcome),
    }
}

#[cfg(feature = "json")]
fn render_json(outcome: &BatchOutcome) -> Result<String> {
    #[derive(serde::Serialize)]
    struct ReportJson<'a> {
        summary: &'a BatchSummary,
        table: &'a Table,
    }

    let report = ReportJson {
        summary: &outcome.summary,
        table: &outcome.table,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(not(feature = "json"))]
fn render_json(_outcome: &BatchOutcome) -> Result<String> {
    Err(crate::error::TagcatError::Report(
        "JSON output requires the 'json' feature (cargo build --features json)".to_string(),
    ))
}

/// Text report: aligned table with a transfer syntax legend
pub struct TextReport<'a> {
    table: &'a Table,
    summary: &'a BatchSummary,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(table: &'a Table, summary: &'a BatchSummary) -> Self {
        Self { table, summary }
    }

    fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        writeln!(f, "{}", line.join("  ").trim_end())
    }

    /// Distinct transfer syntax values in the table
    fn transfer_syntaxes(&self) -> BTreeSet<&'a str> {
        let column = self
            .table
            .schema()
            .fields()
            .iter()
            .position(|field| *field == Field::TransferSyntaxUid);

        match column {
            Some(col) => self
                .table
                .rows()
                .iter()
                .map(|row| row[col].as_str())
                .filter(|value| !value.is_empty())
                .collect(),
            None => BTreeSet::new(),
        }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tag Dump Extraction")?;
        writeln!(f, "===================")?;
        writeln!(f)?;

        let widths = self.table.column_widths();
        Self::write_row(f, self.table.header(), &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("  "))?;
        for row in self.table.rows() {
            Self::write_row(f, row, &widths)?;
        }
        writeln!(f)?;

        let syntaxes = self.transfer_syntaxes();
        if !syntaxes.is_empty() {
            writeln!(f, "Transfer Syntaxes")?;
            writeln!(f, "-----------------")?;
            for uid in syntaxes {
                let name = transfer_syntax_name(uid).unwrap_or_else(|| "unknown".to_string());
                writeln!(f, "{}: {}", uid, name)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", self.summary)
    }
}

/// CSV report: header row then one line per record
pub struct CsvReport<'a> {
    table: &'a Table,
}

impl<'a> CsvReport<'a> {
    /// Creates a new CSV report
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Writes the header and rows as CSV text
    ///
    /// # Errors
    ///
    /// Returns [`TagcatError::Report`](crate::error::TagcatError::Report) if the writer fails.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(self.table.header()).map_err(report_error)?;
        for row in self.table.rows() {
            writer.write_record(row).map_err(report_error)?;
        }

        let bytes = writer.into_inner().map_err(report_error)?;
        String::from_utf8(bytes).map_err(report_error)
    }
}

fn report_error<E: fmt::Display>(e: E) -> crate::error::TagcatError {
    crate::error::TagcatError::Report(format!("CSV output failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TagSchema;
    use crate::types::{Dialect, DumpRecord};

    fn sample_outcome() -> BatchOutcome {
        let mut table = Table::new(&TagSchema::default());

        let mut fuji = DumpRecord::new("fuji_cr.txt", Dialect::Fuji);
        fuji.set(Field::Modality, "CR".to_string());
        fuji.set(Field::InstitutionName, "Mercy, North".to_string());
        fuji.set(Field::TransferSyntaxUid, "1.2.840.10008.1.2.1".to_string());
        table.push(&fuji);

        let mut dcmtk = DumpRecord::new("dcmtk_ct.txt", Dialect::Dcmtk);
        dcmtk.set(Field::Modality, "CT".to_string());
        dcmtk.set(Field::ManufacturerModelName, "Model \"X\"".to_string());
        table.push(&dcmtk);

        BatchOutcome {
            table,
            summary: BatchSummary {
                files_processed: 3,
                dumps_recognized: 2,
                fuji: 1,
                dcmtk: 1,
                skipped: 1,
            },
        }
    }

    #[test]
    fn test_text_report_format() {
        let outcome = sample_outcome();
        let output = render(&outcome, &OutputFormat::Text).unwrap();

        assert!(output.contains("Tag Dump Extraction"));
        assert!(output.contains("filename      accessionNumber  modality"));
        assert!(output.contains("fuji_cr.txt"));
        assert!(output.contains("dcmtk_ct.txt"));
        assert!(output.contains("Transfer Syntaxes"));
        assert!(output.contains("1.2.840.10008.1.2.1: "));
        assert!(output.contains("EXTRACTION: 2 dumps of 3 files"));
    }

    #[test]
    fn test_text_report_columns_align() {
        let outcome = sample_outcome();
        let output = TextReport::new(&outcome.table, &outcome.summary).to_string();
        let lines: Vec<&str> = output.lines().collect();

        let header = lines.iter().position(|l| l.starts_with("filename")).unwrap();
        let modality_col = lines[header].find("modality").unwrap();
        assert_eq!(&lines[header + 2][modality_col..modality_col + 2], "CR");
        assert_eq!(&lines[header + 3][modality_col..modality_col + 2], "CT");
    }

    #[test]
    fn test_csv_report() {
        let outcome = sample_outcome();
        let output = render(&outcome, &OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("filename,accessionNumber,modality,"));
        assert!(lines[1].starts_with("fuji_cr.txt,,CR,"));
        assert!(lines[1].contains("\"Mercy, North\""));
        assert!(lines[2].contains("\"Model \"\"X\"\"\""));
        assert_eq!(lines[0].split(',').count(), 9);
    }

    #[test]
    fn test_csv_plain_cells_are_unquoted() {
        let outcome = sample_outcome();
        let output = CsvReport::new(&outcome.table).to_csv().unwrap();
        assert!(output.starts_with("filename,accessionNumber,"));
        assert!(output.contains("dcmtk_ct.txt,,CT,"));
        assert!(!output.contains('\r'));
    }

    #[test]
    fn test_text_legend_names_dcmdump_transfer_syntax() {
        let mut table = Table::new(&TagSchema::default());
        let mut dcmtk = DumpRecord::new("dcmtk_ct.txt", Dialect::Dcmtk);
        dcmtk.set(Field::TransferSyntaxUid, "LittleEndianExplicit".to_string());
        table.push(&dcmtk);
        let summary = BatchSummary::default();

        let output = TextReport::new(&table, &summary).to_string();
        let legend = output
            .lines()
            .find(|line| line.starts_with("LittleEndianExplicit: "))
            .unwrap();
        assert!(legend.contains("Little Endian"));
        assert!(!legend.ends_with("unknown"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_report() {
        let outcome = sample_outcome();
        let output = render(&outcome, &OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["summary"]["dumps_recognized"], 2);
        assert_eq!(value["table"]["header"][0], "filename");
        assert_eq!(value["table"]["rows"][1][2], "CT");
    }

    #[cfg(not(feature = "json"))]
    #[test]
    fn test_json_requires_feature() {
        let outcome = sample_outcome();
        assert!(matches!(
            render(&outcome, &OutputFormat::Json),
            Err(crate::error::TagcatError::Report(_))
        ));
    }
}
