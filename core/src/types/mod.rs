//! Core type definitions for tag dump extraction
//!
//! This module provides the fundamental types used throughout the tagcat library:
//! - [`Dialect`]: Which dumper produced a text dump (FUJI, DCMTK, or unknown)
//! - [`DetectionStrategy`]: How a dump's dialect is recognized
//! - [`LocateMode`]: How tag lines are searched for in a dump
//! - [`Field`]: The logical metadata fields extracted into every record
//! - [`DumpRecord`]: One extracted record per recognized dump
//! - [`Table`]: Header row plus the data rows of a batch

mod enums;
mod field;
mod record;
mod table;

pub use enums::{DetectionStrategy, Dialect, LocateMode};
pub use field::Field;
pub use record::DumpRecord;
pub use table::Table;
