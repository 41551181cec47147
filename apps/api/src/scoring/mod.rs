//! ATS compatibility scoring.
//!
//! Four independent sub-scores (keywords, experience, format, education) are
//! combined 40/30/20/10 into one overall score. Everything here is pure: the
//! only input besides the two snapshots is the reference date.

pub mod corpus;
pub mod education;
pub mod experience;
pub mod format;
pub mod handlers;
pub mod keywords;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{CandidateProfile, JobAnalysis};
use corpus::build_corpus;
use education::{score_education, EducationScore};
use experience::{score_experience, ExperienceScore};
use format::{score_format, FormatScore};
use keywords::{score_keywords, KeywordScore, MatchMode};

const SUGGESTED_MISSING_IN_KEYWORD_TIP: usize = 5;
const SUGGESTED_MISSING_IN_SKILLS_TIP: usize = 3;

pub const EXPERIENCE_SUGGESTION: &str =
    "Highlight experience that aligns more closely with the role's seniority and responsibilities.";
pub const FORMAT_SUGGESTION: &str =
    "Improve resume structure: add a detailed summary, quantified achievements for each role, and complete contact details.";
pub const EDUCATION_SUGGESTION: &str =
    "Strengthen the education section with relevant degrees, certifications, or coursework.";
pub const POSITIVE_FEEDBACK: &str =
    "Great match! Your resume is well-aligned with this job description.";

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub keyword_match: u32,
    pub experience_relevance: u32,
    pub format_parseability: u32,
    pub education_match: u32,
}

impl ScoreBreakdown {
    /// `round(0.4k + 0.3e + 0.2f + 0.1ed)`, computed in tenths so that exact
    /// halves always round up.
    pub fn weighted_overall(&self) -> u32 {
        let tenths = 4 * self.keyword_match
            + 3 * self.experience_relevance
            + 2 * self.format_parseability
            + self.education_match;
        (tenths + 5) / 10
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreResult {
    pub overall: u32,
    pub breakdown: ScoreBreakdown,
    /// At most ten, in job keyword order.
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Sub-score detail, for callers that want more than the public breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub keywords: KeywordScore,
    pub experience: ExperienceScore,
    pub format: FormatScore,
    pub education: EducationScore,
}

// ────────────────────────────────────────────────────────────────────────────
// Request validation
// ────────────────────────────────────────────────────────────────────────────

/// Body of a scoring call. Both halves are optional on the wire so that a
/// missing object is reported as `InvalidArgument` rather than a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreRequest {
    #[serde(default)]
    pub profile: Option<CandidateProfile>,
    #[serde(default)]
    pub job_analysis: Option<JobAnalysis>,
}

impl AtsScoreRequest {
    pub fn into_parts(self) -> Result<(CandidateProfile, JobAnalysis), ScoringError> {
        let profile = self
            .profile
            .ok_or_else(|| ScoringError::InvalidArgument("profile is required".to_string()))?;
        let job = self
            .job_analysis
            .ok_or_else(|| ScoringError::InvalidArgument("jobAnalysis is required".to_string()))?;
        Ok((profile, job))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Pluggable scorer held in `AppState` as `Arc<dyn AtsScorer>`.
pub trait AtsScorer: Send + Sync {
    fn score_at(&self, profile: &CandidateProfile, job: &JobAnalysis, today: NaiveDate)
        -> AtsScoreResult;

    /// Label reported in logs.
    fn backend(&self) -> &'static str;

    fn score(&self, profile: &CandidateProfile, job: &JobAnalysis) -> AtsScoreResult {
        self.score_at(profile, job, Utc::now().date_naive())
    }
}

/// Default backend: the weighted heuristic below.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAtsScorer {
    pub match_mode: MatchMode,
}

impl HeuristicAtsScorer {
    pub fn new(match_mode: MatchMode) -> Self {
        Self { match_mode }
    }
}

impl AtsScorer for HeuristicAtsScorer {
    fn score_at(
        &self,
        profile: &CandidateProfile,
        job: &JobAnalysis,
        today: NaiveDate,
    ) -> AtsScoreResult {
        let detail = score_detail(profile, job, today, self.match_mode);
        aggregate(&detail)
    }

    fn backend(&self) -> &'static str {
        match self.match_mode {
            MatchMode::Substring => "heuristic",
            MatchMode::WordBoundary => "heuristic-word-boundary",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Scores a profile against a job as of today, using substring matching.
pub fn calculate_ats_score(profile: &CandidateProfile, job: &JobAnalysis) -> AtsScoreResult {
    HeuristicAtsScorer::default().score(profile, job)
}

/// Runs the four sub-scorers. They share no state; order does not matter.
pub fn score_detail(
    profile: &CandidateProfile,
    job: &JobAnalysis,
    today: NaiveDate,
    mode: MatchMode,
) -> ScoreDetail {
    let corpus = build_corpus(profile);
    let detail = ScoreDetail {
        keywords: score_keywords(&corpus, &job.skills, &job.keywords, mode),
        experience: score_experience(&profile.experience, &job.experience_level, today),
        format: score_format(profile),
        education: score_education(&profile.education, &job.requirements),
    };

    debug!(
        "Sub-scores: keywords {}/{} matched -> {}, experience {:.1}y -> {}, format {} ({} rules), education {}",
        detail.keywords.matched,
        detail.keywords.total,
        detail.keywords.score,
        detail.experience.total_years,
        detail.experience.score,
        detail.format.score,
        detail.format.adjustments.len(),
        detail.education.score
    );

    detail
}

pub fn aggregate(detail: &ScoreDetail) -> AtsScoreResult {
    let breakdown = ScoreBreakdown {
        keyword_match: detail.keywords.score,
        experience_relevance: detail.experience.score,
        format_parseability: detail.format.score,
        education_match: detail.education.score,
    };

    AtsScoreResult {
        overall: breakdown.weighted_overall(),
        suggestions: build_suggestions(&breakdown, &detail.keywords.missing),
        missing_keywords: detail.keywords.missing.clone(),
        breakdown,
    }
}

/// Suggestions fire independently, in a fixed order. With none, a single
/// positive message is returned instead.
pub fn build_suggestions(breakdown: &ScoreBreakdown, missing: &[String]) -> Vec<String> {
    let head = |n: usize| missing.iter().take(n).cloned().collect::<Vec<_>>().join(", ");

    let mut suggestions = Vec::new();
    if breakdown.keyword_match < 70 {
        suggestions.push(format!(
            "Incorporate more job-specific keywords. Missing: {}",
            head(SUGGESTED_MISSING_IN_KEYWORD_TIP)
        ));
    }
    if breakdown.experience_relevance < 70 {
        suggestions.push(EXPERIENCE_SUGGESTION.to_string());
    }
    if breakdown.format_parseability < 80 {
        suggestions.push(FORMAT_SUGGESTION.to_string());
    }
    if breakdown.education_match < 70 {
        suggestions.push(EDUCATION_SUGGESTION.to_string());
    }
    if !missing.is_empty() {
        suggestions.push(format!(
            "Consider adding these skills if you have them: {}",
            head(SUGGESTED_MISSING_IN_SKILLS_TIP)
        ));
    }

    if suggestions.is_empty() {
        suggestions.push(POSITIVE_FEEDBACK.to_string());
    }
    suggestions
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{date, sample_profile, senior_job, strings, today};
    use crate::models::{EducationEntry, RoleEnd, WorkExperience};
    use rand::Rng;

    fn score(profile: &CandidateProfile, job: &JobAnalysis) -> AtsScoreResult {
        HeuristicAtsScorer::default().score_at(profile, job, today())
    }

    fn breakdown(k: u32, e: u32, f: u32, ed: u32) -> ScoreBreakdown {
        ScoreBreakdown {
            keyword_match: k,
            experience_relevance: e,
            format_parseability: f,
            education_match: ed,
        }
    }

    #[test]
    fn test_sample_candidate_against_senior_role() {
        let result = score(&sample_profile(), &senior_job());

        // 9 of 12 keywords: agile, team leadership, mentoring absent
        assert_eq!(result.breakdown.keyword_match, 75);
        assert_eq!(
            result.missing_keywords,
            strings(&["agile", "team leadership", "mentoring"])
        );
        assert_eq!(result.breakdown.experience_relevance, 95);
        assert_eq!(result.breakdown.format_parseability, 100);
        assert!(result.breakdown.education_match >= 90);
        // 0.4*75 + 0.3*95 + 0.2*100 + 0.1*100 = 88.5
        assert_eq!(result.overall, 89);
        assert_eq!(
            result.suggestions,
            vec!["Consider adding these skills if you have them: agile, team leadership, mentoring"
                .to_string()]
        );
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let profile = sample_profile();
        let job = senior_job();
        assert_eq!(score(&profile, &job), score(&profile, &job));
    }

    #[test]
    fn test_vacuous_keyword_match() {
        let mut job = senior_job();
        job.skills.clear();
        job.keywords.clear();
        let result = score(&sample_profile(), &job);
        assert_eq!(result.breakdown.keyword_match, 100);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_empty_education_scores_50_regardless_of_requirements() {
        let mut profile = sample_profile();
        profile.education.clear();
        let result = score(&profile, &senior_job());
        assert_eq!(result.breakdown.education_match, 50);
        assert!(result
            .suggestions
            .contains(&EDUCATION_SUGGESTION.to_string()));
    }

    #[test]
    fn test_reactive_substring_registers_react() {
        let profile = CandidateProfile {
            summary: "Designed reactive streaming pipelines for telemetry".to_string(),
            ..Default::default()
        };
        let job = JobAnalysis {
            skills: strings(&["React"]),
            ..Default::default()
        };
        let result = score(&profile, &job);
        assert_eq!(result.breakdown.keyword_match, 100);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_word_boundary_backend_is_stricter() {
        let profile = CandidateProfile {
            summary: "Designed reactive streaming pipelines for telemetry".to_string(),
            ..Default::default()
        };
        let job = JobAnalysis {
            skills: strings(&["React"]),
            ..Default::default()
        };
        let strict = HeuristicAtsScorer::new(MatchMode::WordBoundary);
        let result = strict.score_at(&profile, &job, today());
        assert_eq!(result.breakdown.keyword_match, 0);
        assert_eq!(result.missing_keywords, strings(&["React"]));
        assert_eq!(strict.backend(), "heuristic-word-boundary");
    }

    #[test]
    fn test_weak_profile_collects_all_suggestions_in_order() {
        let profile = CandidateProfile {
            summary: "Hi".to_string(),
            experience: vec![WorkExperience {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                start_date: Some(date(2010, 1, 1)),
                end_date: RoleEnd::On(date(2010, 6, 1)),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut job = senior_job();
        job.requirements.clear();
        // junior band, well below minimum tenure and long ago: 80 - 20 = 60
        job.experience_level = "junior".to_string();
        let result = score(&profile, &job);
        assert_eq!(result.breakdown.experience_relevance, 60);
        // -10 summary, -15 skills, -10 education, -5 achievements
        assert_eq!(result.breakdown.format_parseability, 60);

        assert_eq!(result.breakdown.keyword_match, 0);
        assert_eq!(result.missing_keywords.len(), 10);
        assert_eq!(result.suggestions.len(), 5);
        assert_eq!(
            result.suggestions[0],
            "Incorporate more job-specific keywords. Missing: React, Node.js, TypeScript, Docker, AWS"
        );
        assert_eq!(result.suggestions[1], EXPERIENCE_SUGGESTION);
        assert_eq!(result.suggestions[2], FORMAT_SUGGESTION);
        assert_eq!(result.suggestions[3], EDUCATION_SUGGESTION);
        assert_eq!(
            result.suggestions[4],
            "Consider adding these skills if you have them: React, Node.js, TypeScript"
        );
    }

    #[test]
    fn test_positive_message_when_nothing_fires() {
        let suggestions = build_suggestions(&breakdown(100, 95, 100, 100), &[]);
        assert_eq!(suggestions, vec![POSITIVE_FEEDBACK.to_string()]);
    }

    #[test]
    fn test_missing_request_halves_are_invalid_arguments() {
        let err = AtsScoreRequest::default().into_parts().unwrap_err();
        assert!(err.to_string().contains("profile is required"));

        let err = AtsScoreRequest {
            profile: Some(sample_profile()),
            job_analysis: None,
        }
        .into_parts()
        .unwrap_err();
        assert!(err.to_string().contains("jobAnalysis is required"));
    }

    #[test]
    fn test_weighted_overall_matches_formula_for_random_subscores() {
        let mut rng = rand::rng();
        for _ in 0..2_000 {
            let b = breakdown(
                rng.random_range(0..=100),
                rng.random_range(0..=100),
                rng.random_range(0..=100),
                rng.random_range(0..=100),
            );
            let exact = (4 * b.keyword_match
                + 3 * b.experience_relevance
                + 2 * b.format_parseability
                + b.education_match) as f64
                / 10.0;
            let float = 0.4 * b.keyword_match as f64
                + 0.3 * b.experience_relevance as f64
                + 0.2 * b.format_parseability as f64
                + 0.1 * b.education_match as f64;
            let overall = b.weighted_overall();

            assert_eq!(overall as f64, (exact + 1e-9).round(), "{b:?}");
            assert!((overall as f64 - float).abs() <= 0.5 + 1e-9, "{b:?}");
            assert!(overall <= 100);
        }
    }

    #[test]
    fn test_half_point_totals_round_up_exactly() {
        // 0.3*3 + 0.2*2 + 0.1*2 is 1.5, but summing the float weights lands
        // just under it and would round to 1.
        let b = breakdown(0, 3, 2, 2);
        let float_total = 0.4 * 0.0 + 0.3 * 3.0 + 0.2 * 2.0 + 0.1 * 2.0_f64;
        assert!(float_total < 1.5);
        assert_eq!(float_total.round(), 1.0);
        assert_eq!(b.weighted_overall(), 2);

        assert_eq!(breakdown(0, 0, 0, 5).weighted_overall(), 1);
        assert_eq!(breakdown(100, 100, 100, 100).weighted_overall(), 100);
    }

    #[test]
    fn test_calculate_ats_score_uses_default_backend() {
        let profile = sample_profile();
        let job = senior_job();
        let result = calculate_ats_score(&profile, &job);
        assert_eq!(result, HeuristicAtsScorer::default().score(&profile, &job));
        assert_eq!(result.breakdown.keyword_match, 75);
        assert_eq!(
            result.missing_keywords,
            strings(&["agile", "team leadership", "mentoring"])
        );
    }

    #[test]
    fn test_random_profiles_stay_in_bounds() {
        let mut rng = rand::rng();
        let job = senior_job();
        for _ in 0..200 {
            let experience = (0..rng.random_range(0..6))
                .map(|_| WorkExperience {
                    company: "Co".to_string(),
                    position: if rng.random_bool(0.5) { "Dev".to_string() } else { String::new() },
                    start_date: Some(today() - chrono::Days::new(rng.random_range(0..9_000))),
                    end_date: RoleEnd::Ongoing,
                    achievements: if rng.random_bool(0.5) { strings(&["Shipped"]) } else { vec![] },
                    ..Default::default()
                })
                .collect();
            let education = (0..rng.random_range(0..3))
                .map(|_| EducationEntry {
                    degree: "Master of Science".to_string(),
                    gpa: Some(rng.random_range(0.0..4.0)),
                    ..Default::default()
                })
                .collect();
            let profile = CandidateProfile {
                experience,
                education,
                ..sample_profile()
            };

            let result = score(&profile, &job);
            let b = &result.breakdown;
            for value in [
                result.overall,
                b.keyword_match,
                b.experience_relevance,
                b.format_parseability,
                b.education_match,
            ] {
                assert!(value <= 100);
            }
            assert!(result.missing_keywords.len() <= 10);
            assert!(!result.suggestions.is_empty());
        }
    }
}
