//! Domain-specific assertion macros for keyscout harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which query result property was violated.

/// Assert the keywords of a query result, in order.
///
/// ```rust
/// assert_keywords!(result, ["shoe rack", "sandals"]);
/// ```
#[macro_export]
macro_rules! assert_keywords {
    ($result:expr, [$($kw:expr),* $(,)?]) => {{
        let result: &keyscout_core::search::QueryResult = &$result;
        let actual: Vec<&str> = result.records.iter().map(|r| r.record.keyword.as_str()).collect();
        let expected: Vec<&str> = vec![$($kw),*];
        pretty_assertions::assert_eq!(actual, expected, "keywords of returned page differ");
    }};
}

/// Assert the pagination envelope of a query result.
///
/// ```rust
/// assert_page!(result, page = 2, total_pages = 3, total_results = 25);
/// ```
#[macro_export]
macro_rules! assert_page {
    ($result:expr, page = $page:expr, total_pages = $pages:expr, total_results = $total:expr) => {{
        let result: &keyscout_core::search::QueryResult = &$result;
        pretty_assertions::assert_eq!(
            (result.page, result.total_pages, result.total_results),
            ($page, $pages, $total),
            "(page, total_pages, total_results) mismatch"
        );
    }};
}

/// Assert that every returned score is at least `threshold`.
#[macro_export]
macro_rules! assert_scores_at_least {
    ($result:expr, $threshold:expr) => {{
        let result: &keyscout_core::search::QueryResult = &$result;
        for r in &result.records {
            assert!(
                r.match_score >= $threshold,
                "assert_scores_at_least! failed: {:?} scored {} < {}",
                r.record.keyword,
                r.match_score,
                $threshold
            );
        }
    }};
}
