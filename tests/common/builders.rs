//! Test builders — ergonomic constructors for records, datasets and queries.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use keyscout_core::search::{ColumnFilter, QueryParams, SearchMode};
use keyscout_core::{Dataset, KeywordRecord};

// ---------------------------------------------------------------------------
// Records and datasets
// ---------------------------------------------------------------------------

/// Shorthand for a full record.
pub fn rec(keyword: &str, volume: &str, value: &str) -> KeywordRecord {
    KeywordRecord::new(keyword, volume, value)
}

/// Build a dataset from `(keyword, volume, value)` triples.
pub fn dataset(rows: &[(&str, &str, &str)]) -> Dataset {
    rows.iter().map(|(k, v, d)| rec(k, v, d)).collect()
}

/// Build a dataset of `n` records cycling through the volume buckets.
pub fn build_corpus(n: usize) -> Dataset {
    (0..n)
        .map(|i| {
            let volume = match i % 5 {
                0 => "10K-100K",
                1 => "100K-1M",
                2 => "1M-10M",
                3 => "",
                _ => "1K-10K",
            };
            rec(&format!("keyword {i}"), volume, &(i % 100).to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// QueryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`QueryParams`].
///
/// # Example
///
/// ```rust
/// let params = QueryBuilder::search("shoes")
///     .exact()
///     .threshold(80.0)
///     .page_size(10)
///     .build();
/// ```
#[derive(Default)]
pub struct QueryBuilder {
    params: QueryParams,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(term: &str) -> Self {
        let mut builder = Self::new();
        builder.params.search_term = term.to_string();
        builder
    }

    pub fn exact(mut self) -> Self {
        self.params.search_mode = SearchMode::Exact;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.params.threshold = threshold;
        self
    }

    pub fn filter(mut self, filter: ColumnFilter) -> Self {
        self.params.column_filter = filter;
        self
    }

    pub fn sort(mut self, column: &str, ascending: bool) -> Self {
        self.params.sort_column = column.to_string();
        self.params.sort_ascending = ascending;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.params.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.params.page_size = page_size;
        self
    }

    pub fn build(self) -> QueryParams {
        self.params
    }
}
