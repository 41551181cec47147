//! Content Selector: picks which profile items go into a resume tailored to one job.
//!
//! Experiences and projects are ranked by a combined recency/impact/relevance
//! score and capped per section. Skills are ranked job-matched first. Education
//! is always kept. The tailored profile lists experience most-recent-first so it
//! can be scored directly.

pub mod handlers;
pub mod relevance;

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CandidateProfile, JobAnalysis, ProjectEntry, RoleEnd, WorkExperience};
use crate::scoring::keywords::{keyword_universe, MatchMode};
use relevance::{
    compute_combined_score, compute_impact_score, compute_jd_relevance, compute_recency_score,
    RelevanceWeights,
};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Section-level limits for item selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionLimits {
    pub max_experiences: usize,
    pub max_projects: usize,
    pub max_skills: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            max_experiences: 5,
            max_projects: 3,
            max_skills: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Experience,
    Project,
    Skill,
}

impl Section {
    fn as_str(self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Project => "project",
            Section::Skill => "skill",
        }
    }
}

/// A profile item with its selection scores. `index` points into the
/// corresponding list of the submitted profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub section: Section,
    pub index: usize,
    pub label: String,
    pub combined_score: f64,
    pub jd_relevance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedItem {
    pub section: Section,
    pub index: usize,
    pub label: String,
    pub reason: String,
}

/// Result of content selection. `tailored_profile` holds only selected items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub selected: Vec<RankedItem>,
    pub excluded: Vec<ExcludedItem>,
    pub tailored_profile: CandidateProfile,
}

// ────────────────────────────────────────────────────────────────────────────
// Selection algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn select_content(
    profile: &CandidateProfile,
    job: &JobAnalysis,
    limits: &SelectionLimits,
    mode: MatchMode,
    today: NaiveDate,
) -> SelectionResult {
    let weights = RelevanceWeights::default();
    let terms = keyword_universe(&job.skills, &job.keywords);

    let experience_ranking = rank_by_score(
        profile.experience.iter().enumerate().map(|(index, exp)| {
            let text = experience_text(exp);
            let jd_relevance = compute_jd_relevance(&text, &terms, mode);
            let combined_score = compute_combined_score(
                experience_recency(exp, today),
                compute_impact_score(&exp.achievements),
                jd_relevance,
                &weights,
            );
            RankedItem {
                section: Section::Experience,
                index,
                label: experience_label(exp),
                combined_score,
                jd_relevance,
            }
        }),
    );

    let project_ranking = rank_by_score(profile.projects.iter().enumerate().map(
        |(index, project)| {
            let text = project_text(project);
            let jd_relevance = compute_jd_relevance(&text, &terms, mode);
            let combined_score = compute_combined_score(
                compute_recency_score(project.start_date, project.end_date, today),
                compute_impact_score(&project.highlights),
                jd_relevance,
                &weights,
            );
            RankedItem {
                section: Section::Project,
                index,
                label: project.title.clone(),
                combined_score,
                jd_relevance,
            }
        },
    ));

    let skill_ranking = rank_skills(profile, &terms);

    let mut excluded = Vec::new();
    let experiences = apply_limit(experience_ranking, limits.max_experiences, &mut excluded);
    let projects = apply_limit(project_ranking, limits.max_projects, &mut excluded);
    let skills = apply_limit(skill_ranking, limits.max_skills, &mut excluded);

    let tailored_profile = CandidateProfile {
        personal_info: profile.personal_info.clone(),
        summary: profile.summary.clone(),
        experience: most_recent_first(
            experiences
                .iter()
                .map(|item| profile.experience[item.index].clone())
                .collect(),
        ),
        education: profile.education.clone(),
        skills: skills
            .iter()
            .map(|item| profile.skills[item.index].clone())
            .collect(),
        projects: projects
            .iter()
            .map(|item| profile.projects[item.index].clone())
            .collect(),
    };

    let mut selected = experiences;
    selected.extend(projects);
    selected.extend(skills);

    SelectionResult {
        selected,
        excluded,
        tailored_profile,
    }
}

/// Sorts descending by combined score. Ties keep profile order.
fn rank_by_score(items: impl Iterator<Item = RankedItem>) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = items.collect();
    ranked.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Job-matched skills first, then by years of experience.
fn rank_skills(profile: &CandidateProfile, terms: &[&str]) -> Vec<RankedItem> {
    let lowered_terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();

    let mut ranked: Vec<(bool, f64, RankedItem)> = profile
        .skills
        .iter()
        .enumerate()
        .map(|(index, skill)| {
            let name = skill.name.to_lowercase();
            let matched = !name.is_empty()
                && lowered_terms
                    .iter()
                    .any(|t| name.contains(t.as_str()) || t.contains(name.as_str()));
            let jd_relevance = if matched { 1.0 } else { 0.0 };
            let item = RankedItem {
                section: Section::Skill,
                index,
                label: skill.name.clone(),
                combined_score: jd_relevance,
                jd_relevance,
            };
            (matched, skill.years_of_experience, item)
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then(b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
    });
    ranked.into_iter().map(|(_, _, item)| item).collect()
}

/// Keeps the first `limit` items and records the rest as excluded.
fn apply_limit(
    ranked: Vec<RankedItem>,
    limit: usize,
    excluded: &mut Vec<ExcludedItem>,
) -> Vec<RankedItem> {
    let mut selected = Vec::new();
    for item in ranked {
        if selected.len() < limit {
            selected.push(item);
        } else {
            let reason = format!(
                "Section limit reached ({} max for {})",
                limit,
                item.section.as_str()
            );
            excluded.push(ExcludedItem {
                section: item.section,
                index: item.index,
                label: item.label,
                reason,
            });
        }
    }
    selected
}

/// Ongoing roles first, then by end date and start date, newest first.
pub fn most_recent_first(mut experience: Vec<WorkExperience>) -> Vec<WorkExperience> {
    experience.sort_by_key(|exp| (exp.is_current(), exp.end_date.date(), exp.start_date));
    experience.reverse();
    experience
}

/// A role whose end date could not be read ranks as undated.
fn experience_recency(exp: &WorkExperience, today: NaiveDate) -> f64 {
    match &exp.end_date {
        RoleEnd::Unreadable(_) => compute_recency_score(None, None, today),
        end => compute_recency_score(exp.start_date, end.date(), today),
    }
}

fn experience_label(exp: &WorkExperience) -> String {
    match (exp.position.is_empty(), exp.company.is_empty()) {
        (false, false) => format!("{} at {}", exp.position, exp.company),
        (false, true) => exp.position.clone(),
        _ => exp.company.clone(),
    }
}

fn experience_text(exp: &WorkExperience) -> String {
    let mut parts = vec![exp.position.as_str(), exp.description.as_str()];
    parts.extend(exp.achievements.iter().map(String::as_str));
    parts.extend(exp.technologies.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

fn project_text(project: &ProjectEntry) -> String {
    let mut parts = vec![project.title.as_str(), project.description.as_str()];
    parts.extend(project.highlights.iter().map(String::as_str));
    parts.extend(project.technologies.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
