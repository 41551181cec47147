use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::scoring::keywords::MatchMode;

/// Recency half-life for profile items.
pub const RECENCY_HALF_LIFE_MONTHS: f64 = 18.0;
/// Used when an item has no dates at all.
const UNDATED_RECENCY: f64 = 0.5;
/// Used when an item has no bullets to judge.
const UNKNOWN_IMPACT: f64 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceWeights {
    pub recency: f64,
    pub impact: f64,
    pub jd_relevance: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            recency: 0.5,
            impact: 0.3,
            jd_relevance: 0.2,
        }
    }
}

/// 18-month half-life decay from the item's end date.
/// Ongoing items (start but no end) score 1.0.
pub fn compute_recency_score(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> f64 {
    let end_date = match (start_date, end_date) {
        (_, Some(end)) => end,
        (Some(_), None) => return 1.0,
        (None, None) => return UNDATED_RECENCY,
    };
    let months_since = months_between(end_date, today);
    if months_since <= 0.0 {
        return 1.0;
    }
    (0.5_f64)
        .powf(months_since / RECENCY_HALF_LIFE_MONTHS)
        .clamp(0.0, 1.0)
}

/// Share of bullets carrying a number, percentage or currency amount.
pub fn compute_impact_score(bullets: &[String]) -> f64 {
    if bullets.is_empty() {
        return UNKNOWN_IMPACT;
    }
    let quantified = bullets.iter().filter(|b| has_metric(b)).count();
    quantified as f64 / bullets.len() as f64
}

fn has_metric(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '€' | '£'))
}

/// Fraction of job terms found in `item_text` (already lower-cased).
/// Zero when the job lists no terms.
pub fn compute_jd_relevance(item_text: &str, job_terms: &[&str], mode: MatchMode) -> f64 {
    if job_terms.is_empty() {
        return 0.0;
    }
    let matched = job_terms
        .iter()
        .filter(|term| mode.matches(item_text, term))
        .count();
    matched as f64 / job_terms.len() as f64
}

/// Combined relevance score: 0.5*recency + 0.3*impact + 0.2*jd_relevance
pub fn compute_combined_score(
    recency: f64,
    impact: f64,
    jd_relevance: f64,
    weights: &RelevanceWeights,
) -> f64 {
    (weights.recency * recency + weights.impact * impact + weights.jd_relevance * jd_relevance)
        .clamp(0.0, 1.0)
}

fn months_between(start: NaiveDate, end: NaiveDate) -> f64 {
    let years = end.year() - start.year();
    let months = end.month() as i32 - start.month() as i32;
    let total = years * 12 + months;
    let day_frac = (end.day() as f64 - start.day() as f64) / 30.0;
    (total as f64 + day_frac).max(0.0)
}
