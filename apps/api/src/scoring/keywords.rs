//! Keyword match scorer (40 % of the overall score).
//!
//! Matching is raw case-insensitive containment against the corpus, so "react"
//! is found inside "reactive". The frontend's "Missing Keywords" panel is built
//! on that behaviour. `MatchMode::WordBoundary` is an opt-in stricter mode.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Cap on the number of missing keywords reported back.
pub const MISSING_KEYWORD_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Substring,
    WordBoundary,
}

impl MatchMode {
    /// `corpus` must already be lower-cased.
    pub fn matches(self, corpus: &str, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        match self {
            MatchMode::Substring => corpus.contains(&needle),
            MatchMode::WordBoundary => contains_delimited(corpus, &needle),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub score: u32,
    pub matched: usize,
    pub total: usize,
    pub missing: Vec<String>,
}

/// Case-insensitive union of skills then keywords, first spelling wins,
/// original order preserved.
pub fn keyword_universe<'a>(job_skills: &'a [String], job_keywords: &'a [String]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    job_skills
        .iter()
        .chain(job_keywords)
        .map(String::as_str)
        .filter(|kw| seen.insert(kw.to_lowercase()))
        .collect()
}

pub fn score_keywords(
    corpus: &str,
    job_skills: &[String],
    job_keywords: &[String],
    mode: MatchMode,
) -> KeywordScore {
    let universe = keyword_universe(job_skills, job_keywords);
    let total = universe.len();

    let (hits, misses): (Vec<&str>, Vec<&str>) = universe
        .into_iter()
        .partition(|kw| mode.matches(corpus, kw));
    let matched = hits.len();

    // Vacuously fully matched when the job lists nothing to look for.
    let score = if total == 0 {
        100
    } else {
        (100.0 * matched as f64 / total as f64).round() as u32
    };

    KeywordScore {
        score,
        matched,
        total,
        missing: misses
            .into_iter()
            .take(MISSING_KEYWORD_LIMIT)
            .map(str::to_string)
            .collect(),
    }
}

fn contains_delimited(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
