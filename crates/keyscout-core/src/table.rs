//! Raw tabular input and the two-stage column resolver.
//!
//! A [`TableReader`] turns a file into a [`RawTable`] of optional string
//! cells. [`resolve_columns`] then maps the header onto the canonical
//! `keyword/volume/value` shape, first by name (legacy `KW/Volumn/KD` or the
//! canonical names), then by position when at least three columns exist.

use crate::error::LoadError;
use crate::types::{Dataset, KeywordRecord};
use std::path::Path;

/// Legacy external header names, in canonical column order.
pub const LEGACY_HEADERS: [&str; 3] = ["KW", "Volumn", "KD"];

/// Canonical column names.
pub const CANONICAL_HEADERS: [&str; 3] = ["keyword", "volume", "value"];

/// Cell texts that load as the empty string.
const NA_TOKENS: [&str; 5] = ["", "nan", "NaN", "NA", "null"];

/// The "parse tabular file" capability consumed by the dataset store.
pub trait TableReader {
    /// Partition names inside `path`, in file order.
    fn partitions(&self, path: &Path) -> Result<Vec<String>, LoadError>;

    /// Read one partition (or the whole file for flat formats).
    fn read(&self, path: &Path, partition: Option<&str>) -> Result<RawTable, LoadError>;
}

impl<T: TableReader + ?Sized> TableReader for &T {
    fn partitions(&self, path: &Path) -> Result<Vec<String>, LoadError> {
        (**self).partitions(path)
    }

    fn read(&self, path: &Path, partition: Option<&str>) -> Result<RawTable, LoadError> {
        (**self).read(path, partition)
    }
}

/// Header plus rows of cells. `None` marks an absent cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Convenience constructor from string slices; empty cells stay present.
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| Some(c.to_string())).collect())
                .collect(),
        }
    }
}

/// Where the canonical columns live in a [`RawTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    Named {
        keyword: usize,
        volume: Option<usize>,
        value: Option<usize>,
    },
    Positional,
}

pub fn resolve_columns(headers: &[String]) -> Result<ColumnLayout, LoadError> {
    let find = |col: usize| {
        headers
            .iter()
            .position(|h| h == LEGACY_HEADERS[col])
            .or_else(|| headers.iter().position(|h| h == CANONICAL_HEADERS[col]))
    };

    if let Some(keyword) = find(0) {
        return Ok(ColumnLayout::Named {
            keyword,
            volume: find(1),
            value: find(2),
        });
    }
    if headers.len() >= 3 {
        return Ok(ColumnLayout::Positional);
    }
    Err(LoadError::UnresolvedColumns(headers.to_vec()))
}

/// Build a [`Dataset`] from a raw table.
///
/// A table that parsed into a single keyword column whose values contain
/// commas is treated as a delimiter mis-parse: only the first comma-separated
/// token is kept as the keyword and volume/value are dropped.
pub fn build_dataset(table: &RawTable) -> Result<Dataset, LoadError> {
    let layout = resolve_columns(&table.headers)?;
    let (kw, vol, val) = match layout {
        ColumnLayout::Named {
            keyword,
            volume,
            value,
        } => (keyword, volume, value),
        ColumnLayout::Positional => (0, Some(1), Some(2)),
    };

    let collapsed = table.headers.len() == 1
        && table
            .rows
            .iter()
            .any(|row| cell(row, Some(kw)).contains(','));

    let records = table
        .rows
        .iter()
        .map(|row| {
            let keyword = cell(row, Some(kw));
            if collapsed {
                let first = keyword.split(',').next().unwrap_or_default();
                KeywordRecord::bare(first)
            } else {
                KeywordRecord::new(keyword, cell(row, vol), cell(row, val))
            }
        })
        .collect::<Vec<_>>();

    if collapsed {
        tracing::warn!(
            rows = records.len(),
            "single-column table with embedded commas; keeping first token as keyword"
        );
    }

    Ok(Dataset::new(records))
}

fn cell(row: &[Option<String>], idx: Option<usize>) -> &str {
    match idx.and_then(|i| row.get(i)).and_then(|c| c.as_deref()) {
        Some(text) if !NA_TOKENS.contains(&text) => text,
        _ => "",
    }
}
