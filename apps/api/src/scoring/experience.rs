//! Experience relevance scorer (30 % of the overall score).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{RoleEnd, WorkExperience};

const DAYS_PER_MONTH: f64 = 30.0;
/// Latest role must have ended less than this many days ago for the recency bonus.
const RECENT_WINDOW_DAYS: f64 = 6.0 * DAYS_PER_MONTH;
const MULTI_ROLE_THRESHOLD: usize = 3;
const MULTI_ROLE_BONUS: f64 = 10.0;
const RECENCY_BONUS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeniorityLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Lead,
    Principal,
}

/// Tenure band a seniority level expects, in years, with its base score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeniorityBand {
    pub min_years: f64,
    pub max_years: f64,
    pub base_score: f64,
}

impl SeniorityLevel {
    pub const ALL: [SeniorityLevel; 6] = [
        SeniorityLevel::Entry,
        SeniorityLevel::Junior,
        SeniorityLevel::Mid,
        SeniorityLevel::Senior,
        SeniorityLevel::Lead,
        SeniorityLevel::Principal,
    ];

    /// Exact, case-insensitive lookup. "Senior Engineer" is not a level.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|level| level.as_str() == label)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeniorityLevel::Entry => "entry",
            SeniorityLevel::Junior => "junior",
            SeniorityLevel::Mid => "mid",
            SeniorityLevel::Senior => "senior",
            SeniorityLevel::Lead => "lead",
            SeniorityLevel::Principal => "principal",
        }
    }

    pub fn band(self) -> SeniorityBand {
        let (min_years, max_years, base_score) = match self {
            SeniorityLevel::Entry => (0.0, 2.0, 80.0),
            SeniorityLevel::Junior => (1.0, 3.0, 80.0),
            SeniorityLevel::Mid => (2.0, 5.0, 85.0),
            SeniorityLevel::Senior => (5.0, 10.0, 90.0),
            SeniorityLevel::Lead => (7.0, 15.0, 90.0),
            SeniorityLevel::Principal => (10.0, 20.0, 95.0),
        };
        SeniorityBand {
            min_years,
            max_years,
            base_score,
        }
    }
}

impl SeniorityBand {
    fn score_for(&self, years: f64) -> f64 {
        if years > self.max_years {
            (self.base_score - 5.0).max(70.0)
        } else if years < self.min_years {
            (self.base_score - 20.0).max(50.0)
        } else {
            self.base_score
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceScore {
    pub score: u32,
    pub total_years: f64,
}

/// Months between start and end (or `today` for ongoing roles), in 30-day units.
/// A role without a readable start or end date contributes nothing.
pub fn duration_months(exp: &WorkExperience, today: NaiveDate) -> f64 {
    let Some(start) = exp.start_date else {
        return 0.0;
    };
    let end = match &exp.end_date {
        RoleEnd::Ongoing => today,
        RoleEnd::On(end) => *end,
        RoleEnd::Unreadable(_) => return 0.0,
    };
    (end - start).num_days() as f64 / DAYS_PER_MONTH
}

/// Sum of all role durations in years. Overlapping roles are counted twice.
pub fn total_years(experience: &[WorkExperience], today: NaiveDate) -> f64 {
    experience
        .iter()
        .map(|exp| duration_months(exp, today))
        .sum::<f64>()
        / 12.0
}

/// Scores tenure against the target level.
///
/// `experience` must be ordered most-recent-first: the recency bonus looks only
/// at the first entry.
pub fn score_experience(
    experience: &[WorkExperience],
    target_level: &str,
    today: NaiveDate,
) -> ExperienceScore {
    let total_years = total_years(experience, today);

    let mut score = match SeniorityLevel::parse(target_level) {
        Some(level) => level.band().score_for(total_years),
        None if total_years > 0.0 => 75.0,
        None => 50.0,
    };

    if experience.len() >= MULTI_ROLE_THRESHOLD {
        score = (score + MULTI_ROLE_BONUS).min(100.0);
    }

    // An unreadable end date on the latest role earns no bonus.
    let most_recent_end = match experience.first().map(|exp| &exp.end_date) {
        None | Some(RoleEnd::Ongoing) => Some(today),
        Some(RoleEnd::On(end)) => Some(*end),
        Some(RoleEnd::Unreadable(_)) => None,
    };
    if let Some(end) = most_recent_end {
        let days_since = (today - end).num_days() as f64;
        if days_since < RECENT_WINDOW_DAYS {
            score = (score + RECENCY_BONUS).min(100.0);
        }
    }

    ExperienceScore {
        score: score.round() as u32,
        total_years,
    }
}
