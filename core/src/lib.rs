pub mod api;
pub mod batch;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod schema;
pub mod types;

pub use api::{ExtractorConfig, TagDumpExtractor};
pub use batch::{BatchDriver, BatchOutcome, BatchSummary, DumpSource};
pub use cli::report::{CsvReport, TextReport};
pub use error::{Result, TagcatError};
pub use schema::{DialectKeyMap, TagSchema};
pub use types::*;
