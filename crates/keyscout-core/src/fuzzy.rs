//! Fuzzy similarity scores in `[0, 100]`.
//!
//! Both scores are built on the longest common subsequence (LCS) of the two
//! strings, compared as Unicode scalar values with no case folding:
//!
//! - [`ratio`] — whole-string similarity, `200 · LCS / (|a| + |b|)`.
//! - [`partial_ratio`] — the best [`ratio`] of the shorter string against any
//!   alignment window of the longer one, including windows hanging over
//!   either edge.
//!
//! LCS uses the bit-parallel algorithm when the pattern fits in a machine
//! word and falls back to dynamic programming otherwise.

use std::collections::HashMap;

/// Whole-string similarity of `a` and `b`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    Pattern::new(&a).ratio(&b)
}

/// Best alignment of the shorter string within the longer.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    partial_chars(&Pattern::new(&a), &b)
}

/// Which score a [`Matcher`] computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scorer {
    Partial,
    Ratio,
}

/// A query string prepared once and scored against many candidates.
pub struct Matcher {
    scorer: Scorer,
    pattern: Pattern,
}

impl Matcher {
    pub fn new(query: &str, scorer: Scorer) -> Self {
        let chars: Vec<char> = query.chars().collect();
        Self {
            scorer,
            pattern: Pattern::new(&chars),
        }
    }

    pub fn score(&self, candidate: &str) -> f64 {
        let candidate: Vec<char> = candidate.chars().collect();
        match self.scorer {
            Scorer::Ratio => self.pattern.ratio(&candidate),
            Scorer::Partial => partial_chars(&self.pattern, &candidate),
        }
    }
}

fn partial_chars(query: &Pattern, candidate: &[char]) -> f64 {
    let (m, n) = (query.len(), candidate.len());
    if m == 0 || n == 0 {
        return if m == n { 100.0 } else { 0.0 };
    }
    if m < n {
        return best_alignment(query, candidate);
    }
    let flipped = best_alignment(&Pattern::new(candidate), &query.chars);
    if m == n {
        flipped.max(best_alignment(query, candidate))
    } else {
        flipped
    }
}

/// Max ratio of `short` against every window of `long` of `short`'s length,
/// plus the shorter prefix and suffix windows at the edges.
fn best_alignment(short: &Pattern, long: &[char]) -> f64 {
    let (m, n) = (short.len(), long.len());
    let windows = (1..m)
        .map(|k| &long[..k])
        .chain((0..=n - m).map(|i| &long[i..i + m]))
        .chain((n - m + 1..n).map(|i| &long[i..]));

    let mut best = 0.0f64;
    for window in windows {
        best = best.max(short.ratio(window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// A string prepared for repeated LCS computation.
struct Pattern {
    chars: Vec<char>,
    masks: Option<HashMap<char, u64>>,
}

impl Pattern {
    fn new(chars: &[char]) -> Self {
        let masks = (chars.len() <= 64).then(|| {
            let mut masks: HashMap<char, u64> = HashMap::new();
            for (i, &c) in chars.iter().enumerate() {
                *masks.entry(c).or_default() |= 1u64 << i;
            }
            masks
        });
        Self {
            chars: chars.to_vec(),
            masks,
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn ratio(&self, other: &[char]) -> f64 {
        let total = self.len() + other.len();
        if total == 0 {
            return 100.0;
        }
        200.0 * self.lcs(other) as f64 / total as f64
    }

    fn lcs(&self, other: &[char]) -> usize {
        match &self.masks {
            Some(masks) => lcs_bit_parallel(masks, self.len(), other),
            None => lcs_dp(&self.chars, other),
        }
    }
}

fn lcs_bit_parallel(masks: &HashMap<char, u64>, len: usize, other: &[char]) -> usize {
    if len == 0 {
        return 0;
    }
    let mut s = !0u64;
    for c in other {
        let m = masks.get(c).copied().unwrap_or(0);
        let u = s & m;
        s = s.wrapping_add(u) | (s & !m);
    }
    let live = if len == 64 { !0u64 } else { (1u64 << len) - 1 };
    (!s & live).count_ones() as usize
}

fn lcs_dp(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                cur[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}
