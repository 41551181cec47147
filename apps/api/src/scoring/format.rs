//! Format parseability scorer (20 % of the overall score).
//!
//! Each rule is evaluated against the same profile snapshot and recorded as an
//! `Adjustment`. The score is a fold over that list, so callers can see exactly
//! which rules fired.

use serde::{Deserialize, Serialize};

use crate::models::CandidateProfile;

const MIN_SUMMARY_CHARS: usize = 50;
const MAX_SCORE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatRule {
    ShortSummary,
    NoExperience,
    NoSkills,
    NoEducation,
    ExperienceWithoutAchievements,
    ExperienceMissingTitle,
    HasProjects,
    CompleteContact,
}

impl FormatRule {
    fn delta(self) -> i32 {
        match self {
            FormatRule::ShortSummary => -10,
            FormatRule::NoExperience => -20,
            FormatRule::NoSkills => -15,
            FormatRule::NoEducation => -10,
            FormatRule::ExperienceWithoutAchievements => -5,
            FormatRule::ExperienceMissingTitle => -5,
            FormatRule::HasProjects => 5,
            FormatRule::CompleteContact => 5,
        }
    }

    fn is_bonus(self) -> bool {
        self.delta() > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub rule: FormatRule,
    /// Index into `experience` for per-entry rules.
    pub entry: Option<usize>,
    pub delta: i32,
}

impl Adjustment {
    fn new(rule: FormatRule) -> Self {
        Self {
            rule,
            entry: None,
            delta: rule.delta(),
        }
    }

    fn for_entry(rule: FormatRule, index: usize) -> Self {
        Self {
            entry: Some(index),
            ..Self::new(rule)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatScore {
    pub score: u32,
    pub adjustments: Vec<Adjustment>,
}

/// Lists every rule that fires for this profile, penalties before bonuses.
pub fn collect_adjustments(profile: &CandidateProfile) -> Vec<Adjustment> {
    let mut adjustments = Vec::new();

    if profile.summary.chars().count() < MIN_SUMMARY_CHARS {
        adjustments.push(Adjustment::new(FormatRule::ShortSummary));
    }
    if profile.experience.is_empty() {
        adjustments.push(Adjustment::new(FormatRule::NoExperience));
    }
    if profile.skills.is_empty() {
        adjustments.push(Adjustment::new(FormatRule::NoSkills));
    }
    if profile.education.is_empty() {
        adjustments.push(Adjustment::new(FormatRule::NoEducation));
    }

    for (index, exp) in profile.experience.iter().enumerate() {
        if exp.achievements.is_empty() {
            adjustments.push(Adjustment::for_entry(
                FormatRule::ExperienceWithoutAchievements,
                index,
            ));
        }
        if exp.position.is_empty() || exp.company.is_empty() {
            adjustments.push(Adjustment::for_entry(FormatRule::ExperienceMissingTitle, index));
        }
    }

    if !profile.projects.is_empty() {
        adjustments.push(Adjustment::new(FormatRule::HasProjects));
    }
    let contact = &profile.personal_info;
    if !contact.email.is_empty() && !contact.phone.is_empty() {
        adjustments.push(Adjustment::new(FormatRule::CompleteContact));
    }

    adjustments
}

/// Bonuses are capped at 100 as they are applied; the result is floored at 0.
pub fn apply_adjustments(adjustments: &[Adjustment]) -> u32 {
    let score = adjustments.iter().fold(MAX_SCORE, |acc, adj| {
        let next = acc + adj.delta;
        if adj.rule.is_bonus() {
            next.min(MAX_SCORE)
        } else {
            next
        }
    });
    score.max(0) as u32
}

pub fn score_format(profile: &CandidateProfile) -> FormatScore {
    let adjustments = collect_adjustments(profile);
    FormatScore {
        score: apply_adjustments(&adjustments),
        adjustments,
    }
}
