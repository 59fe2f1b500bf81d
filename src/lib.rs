//! keyscout — keyword dataset explorer
//!
//! Fuzzy search, saved selections and CSV export over a tabular keyword
//! dataset. This crate wires the pure `keyscout-core` layers to the file
//! readers in `keyscout-sources` and exposes both behind [`Explorer`], which
//! the command line front end in [`cli`] drives.
//!
//! # Architecture
//!
//! ```text
//! TableReader ──► DatasetStore ──► QueryEngine
//!                      │
//!                      ├──► SavedLists (enrich)
//!                      └──► ExportAssembler
//! ```

pub mod cli;
pub mod explorer;

pub use explorer::{Explorer, QueryResponse};
pub use keyscout_core::{
    config, error, export, fuzzy, lists, normalizer, search, store, table, types,
};
pub use keyscout_core::{Dataset, Error, KeywordRecord, ListSummary, LoadError, Result, SheetInfo};
pub use keyscout_sources::{CsvReader, FileReader, SourceKind, SpreadsheetReader};
