//! Batch processing over many dumps
//!
//! Reading files and walking directories happen outside this module:
//! the driver receives already-read [`DumpSource`]s and returns a
//! [`Table`](crate::types::Table) plus a [`BatchSummary`].

mod driver;
mod source;

pub use driver::{BatchDriver, BatchOutcome, BatchSummary};
pub use source::DumpSource;
