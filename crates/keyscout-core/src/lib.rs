//! keyscout-core — keyword dataset query engine and saved-list store.
//!
//! This crate exposes the pipeline layers as public modules, plus the shared
//! types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! TableReader ──► Store ──► Search ──► page of results
//!                   │
//!                   ├──► Lists (enrichment)
//!                   └──► Export
//! ```
//!
//! Parsing files and persisting saved lists are collaborator capabilities
//! expressed as the [`table::TableReader`] and [`lists::ListBackend`] traits;
//! concrete readers live in `keyscout-sources`.

pub mod config;
pub mod error;
pub mod export;
pub mod fuzzy;
pub mod lists;
pub mod normalizer;
pub mod search;
pub mod store;
pub mod table;
pub mod types;

pub use error::{Error, LoadError, Result};
pub use normalizer::normalize;
pub use types::{Dataset, KeywordRecord, ListSummary, SheetInfo};
