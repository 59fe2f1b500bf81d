#![allow(unused)]
//! Search layer integration harness.
//!
//! # What this covers
//!
//! - **Column filters**: blank and bucket filters run before scoring and
//!   match by case-insensitive substring, not numeric range.
//! - **Fuzzy modes**: partial containment vs whole-string similarity, and the
//!   threshold cutoff.
//! - **Ordering**: score descending when a search ran, sort column otherwise,
//!   stable in both cases; unknown sort columns fall back to keyword.
//! - **Pagination**: clamping, the empty-dataset envelope, and the property
//!   that pages partition the result set.
//! - **Projection**: returned keywords are normalized.
//! - **Property: idempotence**: the same query twice yields the same page.
//! - **Property: ordering**: browsing follows the sort column per direction
//!   with ties in dataset order; searching ranks by score, then the same.
//!
//! # Running
//!
//! ```sh
//! cargo test --test search_harness
//! ```

mod common;
use common::*;

use keyscout_core::search::{ColumnFilter, QueryEngine, QueryParams, SearchMode};
use keyscout_core::Dataset;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn run(ds: &Dataset, params: QueryParams) -> keyscout_core::search::QueryResult {
    QueryEngine::default().query(ds, &params)
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// Both "seo" keywords contain the term, score 100, and tie-break on keyword.
#[test]
fn partial_search_ranks_by_score_then_keyword() {
    let ds = dataset(&[("seo tools", "10K-100K", "40"), ("seo software", "", "55")]);
    let result = run(&ds, QueryBuilder::search("seo").threshold(60.0).build());

    assert_keywords!(result, ["seo software", "seo tools"]);
    assert_page!(result, page = 1, total_pages = 1, total_results = 2);
    assert_scores_at_least!(result, 60.0);
    assert!(result.records.iter().all(|r| r.match_score == 100.0));
}

#[test]
fn exact_mode_scores_whole_string_similarity() {
    let ds = dataset(&[("seo tools", "", ""), ("seo", "", ""), ("marketing seo", "", "")]);
    let result = run(&ds, QueryBuilder::search("seo").exact().threshold(60.0).build());
    assert_keywords!(result, ["seo"]);
    assert_eq!(result.records[0].match_score, 100.0);
}

#[test]
fn search_term_is_trimmed() {
    let ds = dataset(&[("seo tools", "", "")]);
    let padded = run(&ds, QueryBuilder::search("  seo ").build());
    let plain = run(&ds, QueryBuilder::search("seo").build());
    assert_eq!(padded, plain);
}

#[test]
fn whitespace_only_term_means_no_search() {
    let ds = dataset(&[("b", "", ""), ("a", "", "")]);
    let result = run(&ds, QueryBuilder::search("   ").build());
    assert_keywords!(result, ["a", "b"]);
    assert!(result.records.iter().all(|r| r.match_score == 0.0));
}

#[test]
fn threshold_above_100_returns_nothing() {
    let ds = dataset(&[("seo", "", "")]);
    let result = run(&ds, QueryBuilder::search("seo").threshold(100.5).build());
    assert_page!(result, page = 1, total_pages = 1, total_results = 0);
}

#[test]
fn matching_is_case_sensitive() {
    let ds = dataset(&[("SEO", "", "")]);
    let result = run(&ds, QueryBuilder::search("seo").threshold(50.0).build());
    assert_eq!(result.total_results, 0);
}

// ---------------------------------------------------------------------------
// Column filters
// ---------------------------------------------------------------------------

fn bucket_dataset() -> Dataset {
    dataset(&[
        ("low", "10K-100K", ""),
        ("mid", "100K-1M", ""),
        ("high", "1M-10M", ""),
        ("empty", "", ""),
        ("na", "NA", ""),
        ("lower case", "10k-100k", ""),
        ("other", "1K-10K", ""),
    ])
}

#[rstest]
#[case(ColumnFilter::None, &["empty", "high", "low", "lower case", "mid", "na", "other"])]
#[case(ColumnFilter::Blank, &["empty", "na"])]
#[case(ColumnFilter::BucketLow, &["low", "lower case", "other"])]
#[case(ColumnFilter::BucketMid, &["low", "lower case", "mid"])]
#[case(ColumnFilter::BucketHigh, &["high", "mid"])]
fn filters_use_substring_markers(#[case] filter: ColumnFilter, #[case] expected: &[&str]) {
    let result = run(&bucket_dataset(), QueryBuilder::new().filter(filter).build());
    let keywords: Vec<&str> = result.records.iter().map(|r| r.record.keyword.as_str()).collect();
    assert_eq!(keywords, expected);
}

#[rstest]
#[case("blank", ColumnFilter::Blank)]
#[case("10K-100K", ColumnFilter::BucketLow)]
#[case("100K-1M", ColumnFilter::BucketMid)]
#[case("1M-10M", ColumnFilter::BucketHigh)]
#[case("", ColumnFilter::None)]
#[case("anything", ColumnFilter::None)]
fn filter_wire_names(#[case] wire: &str, #[case] expected: ColumnFilter) {
    assert_eq!(wire.parse::<ColumnFilter>().unwrap(), expected);
}

#[rstest]
#[case("partial", SearchMode::Partial)]
#[case("exact", SearchMode::Exact)]
#[case("fuzzy", SearchMode::Exact)]
fn search_mode_wire_names(#[case] wire: &str, #[case] expected: SearchMode) {
    assert_eq!(wire.parse::<SearchMode>().unwrap(), expected);
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[test]
fn sorts_by_requested_column_descending() {
    let ds = dataset(&[("a", "", "2"), ("b", "", "9"), ("c", "", "5")]);
    let result = run(&ds, QueryBuilder::new().sort("value", false).build());
    assert_keywords!(result, ["b", "c", "a"]);
}

#[test]
fn unknown_sort_column_falls_back_to_keyword() {
    let ds = dataset(&[("b", "", ""), ("a", "", "")]);
    let result = run(&ds, QueryBuilder::new().sort("no_such_column", true).build());
    assert_keywords!(result, ["a", "b"]);
}

#[test]
fn keyword_lower_sorts_case_insensitively() {
    let ds = dataset(&[("b", "", ""), ("C", "", ""), ("a", "", "")]);
    let by_lower = run(&ds, QueryBuilder::new().sort("keyword_lower", true).build());
    let by_raw = run(&ds, QueryBuilder::new().sort("keyword", true).build());
    assert_keywords!(by_lower, ["a", "b", "C"]);
    assert_keywords!(by_raw, ["C", "a", "b"]);
}

#[test]
fn equal_keys_keep_dataset_order() {
    let ds = dataset(&[("x", "1", "first"), ("x", "2", "second"), ("x", "3", "third")]);
    let result = run(&ds, QueryBuilder::new().build());
    let values: Vec<&str> = result.records.iter().map(|r| r.record.value.as_str()).collect();
    assert_eq!(values, ["first", "second", "third"]);
}

// ---------------------------------------------------------------------------
// Pagination and projection
// ---------------------------------------------------------------------------

#[test]
fn empty_dataset_has_one_empty_page() {
    let result = run(&Dataset::empty(), QueryBuilder::search("x").page(4).build());
    assert_page!(result, page = 1, total_pages = 1, total_results = 0);
    assert!(result.records.is_empty());
}

#[rstest]
#[case(0, 1)]
#[case(1, 1)]
#[case(3, 3)]
#[case(99, 3)]
fn page_is_clamped(#[case] requested: usize, #[case] expected: usize) {
    let result = run(&build_corpus(25), QueryBuilder::new().page_size(10).page(requested).build());
    assert_page!(result, page = expected, total_pages = 3, total_results = 25);
}

#[test]
fn last_page_is_short() {
    let result = run(&build_corpus(25), QueryBuilder::new().page_size(10).page(3).build());
    assert_eq!(result.records.len(), 5);
}

#[test]
fn zero_page_size_is_treated_as_one() {
    let result = run(&build_corpus(3), QueryBuilder::new().page_size(0).build());
    assert_eq!((result.page_size, result.total_pages), (1, 3));
}

#[test]
fn returned_keywords_are_normalized() {
    let ds = dataset(&[("running shoes – apparel", "100K-1M", "55")]);
    let result = run(&ds, QueryBuilder::search("running").build());
    assert_keywords!(result, ["running shoes"]);
    assert_eq!(result.records[0].record.volume, "100K-1M");
}

#[test]
fn batch_size_does_not_change_results() {
    let ds = build_corpus(250);
    let params = QueryBuilder::search("keyword 1").threshold(80.0).page_size(1000).build();
    let small = QueryEngine::new(7).query(&ds, &params);
    let large = QueryEngine::new(10_000).query(&ds, &params);
    assert_eq!(small, large);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(
        ("[a-d ]{0,8}", prop::sample::select(vec!["", "10K-100K", "100K-1M", "1M-10M", "na"])),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (kw, vol))| rec(&kw, vol, &i.to_string()))
            .collect()
    })
}

/// Raw sort key of a returned record, looked up through its row number.
fn volume_of<'a>(ds: &'a Dataset, r: &keyscout_core::search::ScoredRecord) -> (&'a str, usize) {
    let idx: usize = r.record.value.parse().unwrap();
    (ds.records()[idx].volume.as_str(), idx)
}

/// Column order per direction, ties in dataset order.
fn in_column_order(a: (&str, usize), b: (&str, usize), ascending: bool) -> bool {
    match a.0.cmp(b.0) {
        std::cmp::Ordering::Equal => a.1 < b.1,
        ord => (ord == std::cmp::Ordering::Less) == ascending,
    }
}

proptest! {
    #[test]
    fn pages_partition_the_results(
        ds in arb_dataset(),
        term in "[a-d]{0,3}",
        page_size in 1usize..7,
    ) {
        let query = |page| {
            QueryBuilder::search(&term).threshold(50.0).page_size(page_size).page(page).build()
        };
        let first = run(&ds, query(1));
        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            let result = run(&ds, query(page));
            prop_assert_eq!(result.page, page);
            seen.extend(result.records.into_iter().map(|r| r.record.value));
        }
        prop_assert_eq!(seen.len(), first.total_results);
        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), seen.len());
    }

    #[test]
    fn queries_are_idempotent(ds in arb_dataset(), term in "[a-d ]{0,4}", desc in any::<bool>()) {
        let params = QueryBuilder::search(&term).sort("volume", !desc).page_size(5).build();
        let engine = QueryEngine::default();
        prop_assert_eq!(engine.query(&ds, &params), engine.query(&ds, &params));
    }

    #[test]
    fn browsing_sorts_by_column_stably(ds in arb_dataset(), ascending in any::<bool>()) {
        let result = run(&ds, QueryBuilder::new().sort("volume", ascending).page_size(100).build());
        prop_assert_eq!(result.total_results, ds.len());
        for w in result.records.windows(2) {
            prop_assert!(in_column_order(volume_of(&ds, &w[0]), volume_of(&ds, &w[1]), ascending));
        }
    }

    #[test]
    fn scored_results_are_ranked(
        ds in arb_dataset(),
        term in "[a-d]{1,3}",
        ascending in any::<bool>(),
    ) {
        let params = QueryBuilder::search(&term)
            .threshold(40.0)
            .sort("volume", ascending)
            .page_size(100)
            .build();
        let result = run(&ds, params);
        prop_assert!(result.records.iter().all(|r| r.match_score >= 40.0));
        for w in result.records.windows(2) {
            prop_assert!(w[0].match_score >= w[1].match_score);
            if w[0].match_score == w[1].match_score {
                let (a, b) = (volume_of(&ds, &w[0]), volume_of(&ds, &w[1]));
                prop_assert!(in_column_order(a, b, ascending));
            }
        }
    }
}
