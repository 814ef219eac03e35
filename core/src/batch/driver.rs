use super::DumpSource;
use crate::api::TagDumpExtractor;
use crate::types::{Dialect, DumpRecord, Table};
use log::info;
use rayon::prelude::*;
use std::fmt;

/// Counts of files seen and dumps recognized in one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BatchSummary {
    /// Files handed to the driver
    pub files_processed: usize,

    /// Files recognized as a tag dump
    pub dumps_recognized: usize,

    /// Dumps recognized as FUJI
    pub fuji: usize,

    /// Dumps recognized as DCMTK
    pub dcmtk: usize,

    /// Files skipped as unrecognized
    pub skipped: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: Option<&DumpRecord>) {
        self.files_processed += 1;
        match outcome.map(|record| record.dialect) {
            Some(Dialect::Fuji) => {
                self.dumps_recognized += 1;
                self.fuji += 1;
            }
            Some(Dialect::Dcmtk) => {
                self.dumps_recognized += 1;
                self.dcmtk += 1;
            }
            Some(Dialect::Unknown) | None => self.skipped += 1,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EXTRACTION: {} dumps of {} files ({} fuji, {} dcmtk, {} skipped)",
            self.dumps_recognized, self.files_processed, self.fuji, self.dcmtk, self.skipped
        )
    }
}

/// Result of running a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Header plus one row per recognized dump, in input order
    pub table: Table,

    /// Per-batch counts
    pub summary: BatchSummary,
}

/// Runs the extractor over a list of dumps and collects the table
///
/// Row order always matches input order; unrecognized files add no row.
///
/// # Example
///
/// ```
/// use tagcat_core::{BatchDriver, DumpSource};
///
/// let sources = vec![
///     DumpSource::from_text("cr.txt", "Grp  Elmt | Description\n0008 0060 | modality | CS | 2 | \"CR\""),
///     DumpSource::from_text("readme.txt", "nothing here"),
/// ];
///
/// let outcome = BatchDriver::default().run(&sources);
/// assert_eq!(outcome.table.len(), 1);
/// assert_eq!(outcome.table.rows()[0][0], "cr.txt");
/// assert_eq!(outcome.summary.skipped, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchDriver {
    extractor: TagDumpExtractor,
}

impl BatchDriver {
    /// Creates a driver around an extractor
    pub fn new(extractor: TagDumpExtractor) -> Self {
        Self { extractor }
    }

    /// Extractor used for each file
    pub fn extractor(&self) -> &TagDumpExtractor {
        &self.extractor
    }

    /// Processes dumps one after another
    pub fn run(&self, sources: &[DumpSource]) -> BatchOutcome {
        info!("PARSING: ({}) files", sources.len());
        let records = sources
            .iter()
            .enumerate()
            .map(|(idx, source)| {
                info!("   reading_{:03}: {}", idx + 1, source.filename);
                self.extractor.extract(&source.filename, &source.lines)
            })
            .collect();
        self.assemble(records)
    }

    /// Processes dumps on the rayon thread pool
    ///
    /// Produces the same table as [`BatchDriver::run`].
    pub fn run_parallel(&self, sources: &[DumpSource]) -> BatchOutcome {
        info!("PARSING: ({}) files in parallel", sources.len());
        let records = sources
            .par_iter()
            .map(|source| self.extractor.extract(&source.filename, &source.lines))
            .collect();
        self.assemble(records)
    }

    fn assemble(&self, records: Vec<Option<DumpRecord>>) -> BatchOutcome {
        let mut table = Table::new(self.extractor.config().schema());
        let mut summary = BatchSummary::default();

        for outcome in &records {
            summary.record(outcome.as_ref());
            if let Some(record) = outcome {
                table.push(record);
            }
        }

        info!("{}", summary);
        BatchOutcome { table, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuji_source(name: &str, modality: &str) -> DumpSource {
        DumpSource::from_text(
            name,
            &format!(
                "Grp  Elmt | Description | VR | Len | Value\n0008 0060 | modality | CS | 2 | \"{}\"",
                modality
            ),
        )
    }

    fn dcmtk_source(name: &str, modality: &str) -> DumpSource {
        DumpSource::from_text(
            name,
            &format!(
                "# Dicom-File-Format\n# Dicom-Meta-Information-Header\n(0008,0060) CS [{}]  #   2, 1 Modality",
                modality
            ),
        )
    }

    #[test]
    fn test_summary_counts() {
        let sources = vec![
            fuji_source("a.txt", "CR"),
            DumpSource::from_text("b.txt", "unrelated"),
            dcmtk_source("c.txt", "CT"),
            dcmtk_source("d.txt", "MR"),
        ];
        let outcome = BatchDriver::default().run(&sources);

        assert_eq!(
            outcome.summary,
            BatchSummary {
                files_processed: 4,
                dumps_recognized: 3,
                fuji: 1,
                dcmtk: 2,
                skipped: 1,
            }
        );
        assert_eq!(outcome.table.len(), 3);
    }

    #[test]
    fn test_rows_follow_input_order() {
        let sources = vec![
            dcmtk_source("z.txt", "CT"),
            fuji_source("a.txt", "CR"),
            dcmtk_source("m.txt", "MR"),
        ];
        let outcome = BatchDriver::default().run(&sources);
        let names: Vec<&str> = outcome
            .table
            .rows()
            .iter()
            .map(|row| row[0].as_str())
            .collect();
        assert_eq!(names, vec!["z.txt", "a.txt", "m.txt"]);
        assert_eq!(outcome.table.rows()[1][2], "CR");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sources: Vec<DumpSource> = (0..64)
            .map(|i| match i % 3 {
                0 => fuji_source(&format!("f{:02}.txt", i), "CR"),
                1 => dcmtk_source(&format!("d{:02}.txt", i), "CT"),
                _ => DumpSource::from_text(format!("n{:02}.txt", i), "notes"),
            })
            .collect();

        let driver = BatchDriver::default();
        assert_eq!(driver.run(&sources), driver.run_parallel(&sources));
    }

    #[test]
    fn test_empty_batch() {
        let outcome = BatchDriver::default().run(&[]);
        assert!(outcome.table.is_empty());
        assert_eq!(outcome.summary, BatchSummary::default());
        assert_eq!(outcome.table.header().len(), 9);
    }

    #[test]
    fn test_summary_display() {
        let summary = BatchSummary {
            files_processed: 3,
            dumps_recognized: 2,
            fuji: 1,
            dcmtk: 1,
            skipped: 1,
        };
        assert_eq!(
            summary.to_string(),
            "EXTRACTION: 2 dumps of 3 files (1 fuji, 1 dcmtk, 1 skipped)"
        );
    }
}
