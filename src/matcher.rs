//! Approximate string matching for spelling repair
//!
//! The recovery engine consumes exactly one capability from this module:
//! given a misspelled token and the set of lookahead terminals that would
//! have been valid, return the closest candidate if it is close enough.
//!
//! Similarity is the shared-subsequence ratio `2 * lcs(a, b) / (|a| + |b|)`
//! over characters, in `[0, 1]`. Candidates below the cutoff are ignored;
//! ties go to the earliest candidate.

/// Minimum similarity for a candidate to count as a near miss
pub const SIMILARITY_CUTOFF: f64 = 0.8;

/// Returns the candidate most similar to `word`, if any reaches the cutoff
pub fn closest_match<'a, I>(word: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, f64)> = None;
    for candidate in candidates {
        let score = similarity(word, candidate);
        if score >= SIMILARITY_CUTOFF && best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Shared-subsequence ratio between two strings
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let lcs = longest_common_subsequence(&a, &b);
    (2 * lcs) as f64 / (a.len() + b.len()) as f64
}

/// Classic single-row LCS length
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for ch_a in a {
        let mut diagonal = 0;
        for (j, ch_b) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ch_a == ch_b {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}
