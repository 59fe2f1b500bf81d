//! Core types for keyscout-core.
//!
//! This module defines the data structures shared across all layers: the
//! loaded [`KeywordRecord`], the immutable [`Dataset`] snapshot with its
//! derived indexes, and the small summary types handed back to callers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a keyword dataset in the canonical three-column shape.
///
/// Fields are never absent: missing cells load as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeywordRecord {
    /// Display keyword. May carry a ` – ` suffix; see [`crate::normalize`].
    pub keyword: String,
    /// Search volume, usually a magnitude bucket such as `10K-100K`.
    pub volume: String,
    /// Difficulty score kept as text.
    pub value: String,
}

impl KeywordRecord {
    pub fn new(
        keyword: impl Into<String>,
        volume: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            volume: volume.into(),
            value: value.into(),
        }
    }

    /// A record with only a keyword, used when a saved keyword has no row.
    pub fn bare(keyword: impl Into<String>) -> Self {
        Self::new(keyword, "", "")
    }

    /// `true` when the volume is empty or the literal `na` in any case.
    pub fn has_blank_volume(&self) -> bool {
        self.volume.is_empty() || self.volume.eq_ignore_ascii_case("na")
    }
}

/// An immutable snapshot of the loaded table.
///
/// Replaced wholesale on every load; never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<KeywordRecord>,
    keyword_lower: Vec<String>,
    by_keyword: HashMap<String, Vec<usize>>,
}

impl Dataset {
    pub fn new(records: Vec<KeywordRecord>) -> Self {
        let keyword_lower = records.iter().map(|r| r.keyword.to_lowercase()).collect();
        let mut by_keyword: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_keyword.entry(record.keyword.clone()).or_default().push(idx);
        }
        Self {
            records,
            keyword_lower,
            by_keyword,
        }
    }

    /// The zero-row sentinel meaning "nothing usable loaded".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[KeywordRecord] {
        &self.records
    }

    /// Lowercased keyword of row `idx`.
    pub fn keyword_lower(&self, idx: usize) -> &str {
        &self.keyword_lower[idx]
    }

    /// Rows whose keyword equals `keyword` exactly, in dataset order.
    pub fn rows_for<'a>(&'a self, keyword: &str) -> impl Iterator<Item = &'a KeywordRecord> + 'a {
        self.by_keyword
            .get(keyword)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.records[idx])
    }
}

impl FromIterator<KeywordRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = KeywordRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Name and size of one saved list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub name: String,
    pub count: usize,
}

/// The partition selector state of the dataset store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SheetInfo {
    pub current_sheet: Option<String>,
    pub available_sheets: Vec<String>,
}
