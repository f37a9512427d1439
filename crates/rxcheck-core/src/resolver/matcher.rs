//! Fuzzy drug-name matching.
//!
//! Scores are on a 0 - 100 scale. Both strings are lowercased and stripped
//! of punctuation, then compared three ways: directly, with their words
//! sorted (so "acid folic" still finds "Folic Acid"), and the shorter name
//! against runs of consecutive words in the longer one (so "Ibuprofen 400mg"
//! still finds "Ibuprofen"). The window comparison is discounted by
//! [`PARTIAL_MATCH_FACTOR`]. Each comparison averages Jaro-Winkler,
//! normalized Levenshtein and bigram Sorensen-Dice; Dice keeps look-alike
//! names with different stems ("Duloxetine", "Fluoxetine") below the
//! threshold. The best comparison is the score.

use strsim::{jaro_winkler, normalized_levenshtein, sorensen_dice};

use crate::models::MatchResult;

/// Scores at or above this are accepted as a match.
pub const DEFAULT_MATCH_THRESHOLD: u8 = 80;

/// Discount applied when only part of the longer name is compared.
pub const PARTIAL_MATCH_FACTOR: f64 = 0.9;

/// Matches raw drug names against a reference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatcher {
    threshold: u8,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NameMatcher {
    /// Create a matcher with the default threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_MATCH_THRESHOLD)
    }

    /// Create a matcher with a custom acceptance threshold (0 - 100).
    pub fn with_threshold(threshold: u8) -> Self {
        Self {
            threshold: threshold.min(100),
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Check whether a score is high enough to accept. The threshold is inclusive.
    pub fn accepts(&self, score: u8) -> bool {
        score >= self.threshold
    }

    /// Similarity of two names, 0 - 100. Blank input scores 0.
    pub fn similarity(a: &str, b: &str) -> u8 {
        let a = preprocess(a);
        let b = preprocess(b);
        if a.is_empty() || b.is_empty() {
            return 0;
        }

        let direct = blend(&a, &b);
        let sorted = blend(&token_sort(&a), &token_sort(&b));
        let partial = partial_blend(&a, &b) * PARTIAL_MATCH_FACTOR;
        (direct.max(sorted).max(partial) * 100.0)
            .round()
            .clamp(0.0, 100.0) as u8
    }

    /// Find the best candidate for `raw`.
    ///
    /// The highest score wins; on a tie the earlier candidate is kept.
    /// `matched_name` is set only when the best score is accepted.
    pub fn best_match(&self, raw: &str, candidates: &[String]) -> MatchResult {
        match Self::best(raw, candidates) {
            Some((name, score)) => MatchResult {
                input: raw.to_string(),
                matched_name: self.accepts(score).then(|| name.to_string()),
                confidence: score,
            },
            None => MatchResult::unmatched(raw),
        }
    }

    /// Canonical name for `raw`, or `None` when nothing scores high enough.
    pub fn match_name<'c>(&self, raw: &str, candidates: &'c [String]) -> Option<&'c str> {
        Self::best(raw, candidates)
            .filter(|(_, score)| self.accepts(*score))
            .map(|(name, _)| name)
    }

    fn best<'c>(raw: &str, candidates: &'c [String]) -> Option<(&'c str, u8)> {
        let mut best: Option<(&'c str, u8)> = None;
        for candidate in candidates {
            let score = Self::similarity(raw, candidate);
            // Strictly greater: ties keep the earlier candidate.
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate.as_str(), score));
            }
        }
        best
    }
}

/// Lowercase, replace non-alphanumerics with spaces, collapse whitespace.
fn preprocess(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    replaced
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn token_sort(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn blend(a: &str, b: &str) -> f64 {
    (jaro_winkler(a, b) + normalized_levenshtein(a, b) + sorensen_dice(a, b)) / 3.0
}

/// Best blend of the shorter name against each run of the same number of
/// consecutive words in the longer one. Zero when both have the same word count.
fn partial_blend(a: &str, b: &str) -> f64 {
    let a_words: Vec<&str> = a.split_whitespace().collect();
    let b_words: Vec<&str> = b.split_whitespace().collect();
    let (short, long) = if a_words.len() < b_words.len() {
        (a_words, b_words)
    } else {
        (b_words, a_words)
    };
    if short.len() == long.len() {
        return 0.0;
    }

    let needle = short.join(" ");
    long.windows(short.len())
        .map(|window| blend(&needle, &window.join(" ")))
        .fold(0.0, f64::max)
}
