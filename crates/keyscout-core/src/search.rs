//! Search layer — the query pipeline over a [`Dataset`] snapshot.
//!
//! [`QueryEngine::query`] runs five pure steps in order:
//!
//! 1. column filter on the volume bucket,
//! 2. fuzzy scoring against the search term (batched, threshold cutoff),
//! 3. stable sort (score first when a search ran, then the sort column),
//! 4. pagination with the page clamped into range,
//! 5. projection with normalized keywords.
//!
//! The engine holds no state that changes between calls, so identical
//! inputs always produce identical pages.

use crate::fuzzy::{Matcher, Scorer};
use crate::normalizer::normalize;
use crate::types::{Dataset, KeywordRecord};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default number of records scored per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Fuzzy match mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Best alignment of the shorter string within the longer.
    #[default]
    Partial,
    /// Whole-string similarity.
    Exact,
}

impl FromStr for SearchMode {
    type Err = std::convert::Infallible;

    /// `partial` selects partial matching; any other value selects exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "partial" => SearchMode::Partial,
            _ => SearchMode::Exact,
        })
    }
}

impl From<SearchMode> for Scorer {
    fn from(mode: SearchMode) -> Self {
        match mode {
            SearchMode::Partial => Scorer::Partial,
            SearchMode::Exact => Scorer::Ratio,
        }
    }
}

/// Volume-based row filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum ColumnFilter {
    #[default]
    None,
    /// Volume empty or `na`.
    Blank,
    /// Volume contains `10K`.
    BucketLow,
    /// Volume contains `100K`.
    BucketMid,
    /// Volume contains `1M`.
    BucketHigh,
}

impl ColumnFilter {
    /// Substring marker for the bucket filters.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            ColumnFilter::BucketLow => Some("10K"),
            ColumnFilter::BucketMid => Some("100K"),
            ColumnFilter::BucketHigh => Some("1M"),
            ColumnFilter::None | ColumnFilter::Blank => None,
        }
    }

    pub fn matches(self, record: &KeywordRecord) -> bool {
        match self {
            ColumnFilter::None => true,
            ColumnFilter::Blank => record.has_blank_volume(),
            bucket => {
                let marker = bucket.marker().unwrap_or_default();
                record
                    .volume
                    .to_ascii_lowercase()
                    .contains(&marker.to_ascii_lowercase())
            }
        }
    }
}

impl FromStr for ColumnFilter {
    type Err = std::convert::Infallible;

    /// Wire names are `blank`, `10K-100K`, `100K-1M` and `1M-10M`; anything
    /// else means no filter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "blank" => ColumnFilter::Blank,
            "10K-100K" => ColumnFilter::BucketLow,
            "100K-1M" => ColumnFilter::BucketMid,
            "1M-10M" => ColumnFilter::BucketHigh,
            _ => ColumnFilter::None,
        })
    }
}

/// A sortable dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Keyword,
    Volume,
    Value,
    /// The derived lowercase keyword index.
    KeywordLower,
}

impl SortColumn {
    /// Resolve a column name; unknown names fall back to the keyword column.
    pub fn resolve(name: &str) -> Self {
        match name {
            "volume" => SortColumn::Volume,
            "value" => SortColumn::Value,
            "keyword_lower" => SortColumn::KeywordLower,
            _ => SortColumn::Keyword,
        }
    }

    fn key<'a>(self, dataset: &'a Dataset, idx: usize) -> &'a str {
        match self {
            SortColumn::Keyword => &dataset.records()[idx].keyword,
            SortColumn::Volume => &dataset.records()[idx].volume,
            SortColumn::Value => &dataset.records()[idx].value,
            SortColumn::KeywordLower => dataset.keyword_lower(idx),
        }
    }
}

/// Everything a caller can ask of the query engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub search_term: String,
    pub search_mode: SearchMode,
    /// Minimum score to keep a record. Not clamped.
    pub threshold: f64,
    pub column_filter: ColumnFilter,
    pub sort_column: String,
    pub sort_ascending: bool,
    /// 1-based; clamped into `[1, total_pages]`.
    pub page: usize,
    /// Treated as at least 1.
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            search_mode: SearchMode::Partial,
            threshold: 70.0,
            column_filter: ColumnFilter::None,
            sort_column: "keyword".to_string(),
            sort_ascending: true,
            page: 1,
            page_size: 200,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One returned row with its match score (0 when no search ran).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: KeywordRecord,
    pub match_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub records: Vec<ScoredRecord>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_results: usize,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct QueryEngine {
    batch_size: usize,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

struct Hit {
    idx: usize,
    score: f64,
}

impl QueryEngine {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn query(&self, dataset: &Dataset, params: &QueryParams) -> QueryResult {
        let filtered: Vec<usize> = dataset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| params.column_filter.matches(r))
            .map(|(idx, _)| idx)
            .collect();

        let term = params.search_term.trim();
        let searched = !term.is_empty();
        let mut hits = if searched {
            self.score(dataset, &filtered, term, params)
        } else {
            filtered.into_iter().map(|idx| Hit { idx, score: 0.0 }).collect()
        };

        let column = SortColumn::resolve(&params.sort_column);
        hits.sort_by(|a, b| {
            let by_column = || {
                let ord = column.key(dataset, a.idx).cmp(column.key(dataset, b.idx));
                if params.sort_ascending {
                    ord
                } else {
                    ord.reverse()
                }
            };
            if searched {
                b.score.total_cmp(&a.score).then_with(by_column)
            } else {
                by_column()
            }
        });

        let total_results = hits.len();
        let page_size = params.page_size.max(1);
        let total_pages = total_results.div_ceil(page_size).max(1);
        let page = params.page.clamp(1, total_pages);
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total_results);

        tracing::debug!(
            search = searched,
            total_results,
            page,
            total_pages,
            "query complete"
        );

        let records = hits[start..end]
            .iter()
            .map(|hit| {
                let row = &dataset.records()[hit.idx];
                ScoredRecord {
                    record: KeywordRecord::new(normalize(&row.keyword), &row.volume, &row.value),
                    match_score: hit.score,
                }
            })
            .collect();

        QueryResult {
            records,
            page,
            page_size,
            total_pages,
            total_results,
        }
    }

    /// Score `candidates` in batches and keep those at or above the threshold.
    fn score(
        &self,
        dataset: &Dataset,
        candidates: &[usize],
        term: &str,
        params: &QueryParams,
    ) -> Vec<Hit> {
        let matcher = Matcher::new(term, params.search_mode.into());
        let mut hits = Vec::new();
        for batch in candidates.chunks(self.batch_size) {
            hits.extend(batch.iter().filter_map(|&idx| {
                let score = matcher.score(&dataset.records()[idx].keyword);
                (score >= params.threshold).then_some(Hit { idx, score })
            }));
        }
        tracing::debug!(
            candidates = candidates.len(),
            matched = hits.len(),
            "fuzzy scoring done"
        );
        hits
    }
}
