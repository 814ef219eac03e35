use super::DumpRecord;
use crate::schema::TagSchema;

/// Output table: a header row followed by one data row per recognized dump
///
/// Rows are append-only and keep the order in which records were pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    #[cfg_attr(feature = "json", serde(skip))]
    schema: TagSchema,
}

impl Table {
    /// Creates an empty table whose header is the schema's field names
    pub fn new(schema: &TagSchema) -> Self {
        Self {
            header: schema.headers(),
            rows: Vec::new(),
            schema: schema.clone(),
        }
    }

    /// Appends a record as a row in schema order
    pub fn push(&mut self, record: &DumpRecord) {
        self.rows.push(record.to_row(&self.schema));
    }

    /// Header cells
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, excluding the header
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Schema the table was built from
    pub fn schema(&self) -> &TagSchema {
        &self.schema
    }

    /// Width of each column: the length of its longest cell, header included
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}
