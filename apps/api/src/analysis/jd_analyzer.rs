//! JD Analyzer: derives a `JobAnalysis` from pasted job-description text.
//!
//! Dictionary and cue-word driven; no LLM call. Dictionary lookups use
//! word-boundary matching so "Java" is not found inside "JavaScript".

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::models::{JobAnalysis, Requirement, RequirementCategory, RequirementType};
use crate::scoring::education::DegreeSet;
use crate::scoring::experience::SeniorityLevel;
use crate::scoring::keywords::MatchMode;

/// Technologies recognised as job skills, reported in this order.
pub const TECH_SKILLS: &[&str] = &[
    "JavaScript", "TypeScript", "Python", "Java", "Golang", "Rust", "C++", "C#", "Ruby",
    "PHP", "Kotlin", "Swift", "Scala", "SQL", "React", "Angular", "Vue", "Next.js",
    "Node.js", "Express", "Django", "Flask", "Spring Boot", "GraphQL", "REST", "HTML",
    "CSS", "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Jenkins", "Git",
    "Linux", "PostgreSQL", "MySQL", "MongoDB", "Redis", "Kafka", "Elasticsearch",
    "TensorFlow", "PyTorch", "Spark",
];

/// Practices and soft skills recognised as job keywords.
pub const PRACTICE_KEYWORDS: &[&str] = &[
    "agile", "scrum", "scalable", "scalability", "performance", "optimization",
    "microservices", "distributed systems", "CI/CD", "DevOps", "testing", "TDD",
    "code review", "mentoring", "team leadership", "communication", "collaboration",
    "problem solving", "security", "automation", "architecture", "API design",
    "data pipelines", "machine learning", "monitoring", "observability",
];

const PREFERRED_CUES: &[&str] = &[
    "preferred", "nice to have", "nice-to-have", "bonus", "a plus", "desirable",
];
const REQUIRED_HEADINGS: &[&str] = &[
    "requirement", "qualification", "must have", "must-have", "what you bring",
    "what we're looking for", "what we are looking for", "you have",
];
const REQUIREMENT_CUES: &[&str] = &[
    "required", "must", "experience", "degree", "years", "proficien", "knowledge of",
    "familiar", "understanding of", "ability to",
];

const REQUIRED_IMPORTANCE: f64 = 1.0;
const PREFERRED_IMPORTANCE: f64 = 0.5;
const HEADING_MAX_WORDS: usize = 6;

static YEARS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:-|to)?\s*(?:\d{1,2}\s*)?\+?\s*years?\b")
        .expect("years pattern is a valid regex")
});

/// Request body for job-description analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeJobRequest {
    pub text: String,
    #[serde(default)]
    pub company: Option<String>,
    /// When absent, the first non-empty line of `text` is taken as the title.
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Other,
    Required,
    Preferred,
}

pub fn analyze_job_description(request: &AnalyzeJobRequest) -> JobAnalysis {
    let text = request.text.as_str();
    let lowered = text.to_lowercase();

    let position = request
        .position
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| first_line(text).to_string());

    JobAnalysis {
        company: request.company.clone().unwrap_or_default(),
        experience_level: detect_experience_level(&position, text).as_str().to_string(),
        position,
        requirements: extract_requirements(text),
        skills: find_terms(&lowered, TECH_SKILLS),
        keywords: find_terms(&lowered, PRACTICE_KEYWORDS),
    }
}

fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
}

fn find_terms(lowered: &str, dictionary: &[&str]) -> Vec<String> {
    dictionary
        .iter()
        .filter(|term| MatchMode::WordBoundary.matches(lowered, term))
        .map(|term| term.to_string())
        .collect()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Title cues win; otherwise the largest "N+ years" figure picks the band.
pub fn detect_experience_level(title: &str, text: &str) -> SeniorityLevel {
    let title = title.to_lowercase();
    let has = |cue: &str| MatchMode::WordBoundary.matches(&title, cue);

    if has("principal") || has("distinguished") {
        return SeniorityLevel::Principal;
    }
    if has("lead") || has("staff") {
        return SeniorityLevel::Lead;
    }
    if has("senior") || has("sr") {
        return SeniorityLevel::Senior;
    }
    if has("junior") || has("jr") {
        return SeniorityLevel::Junior;
    }
    if has("entry") || has("graduate") || has("intern") {
        return SeniorityLevel::Entry;
    }

    match max_years_mentioned(text) {
        Some(years) if years >= 10 => SeniorityLevel::Principal,
        Some(years) if years >= 7 => SeniorityLevel::Lead,
        Some(years) if years >= 5 => SeniorityLevel::Senior,
        Some(years) if years >= 2 => SeniorityLevel::Mid,
        Some(years) if years >= 1 => SeniorityLevel::Junior,
        Some(_) => SeniorityLevel::Entry,
        None => SeniorityLevel::Mid,
    }
}

pub fn max_years_mentioned(text: &str) -> Option<u32> {
    YEARS_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
}

/// Splits the text into line items and keeps the ones that read as requirements.
pub fn extract_requirements(text: &str) -> Vec<Requirement> {
    let mut section = Section::Other;
    let mut requirements = Vec::new();

    for raw_line in text.lines() {
        let line = strip_bullet(raw_line);
        if line.is_empty() {
            continue;
        }

        let (heading, rest) = split_heading(line);
        if let Some(heading) = heading {
            section = classify_heading(&heading.to_lowercase());
            if rest.is_empty() {
                continue;
            }
        }

        let lowered = rest.to_lowercase();
        let in_requirement_section = section != Section::Other;
        if !in_requirement_section && !contains_any(&lowered, REQUIREMENT_CUES) {
            continue;
        }

        let category = if section == Section::Preferred || contains_any(&lowered, PREFERRED_CUES) {
            RequirementCategory::Preferred
        } else {
            RequirementCategory::Required
        };

        requirements.push(Requirement {
            text: rest.to_string(),
            category,
            kind: classify_requirement(&lowered),
            importance: match category {
                RequirementCategory::Required => REQUIRED_IMPORTANCE,
                RequirementCategory::Preferred => PREFERRED_IMPORTANCE,
            },
        });
    }

    requirements
}

fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['-', '*', '•', '·', '–', '>'])
        .trim()
}

/// "Requirements:" or "Nice to have: Kafka" → (heading, remainder).
fn split_heading(line: &str) -> (Option<&str>, &str) {
    match line.split_once(':') {
        Some((head, rest))
            if !head.is_empty()
                && head.split_whitespace().count() <= HEADING_MAX_WORDS
                && !head.contains("http") =>
        {
            (Some(head.trim()), rest.trim())
        }
        _ => (None, line),
    }
}

fn classify_heading(heading: &str) -> Section {
    if contains_any(heading, PREFERRED_CUES) || heading.contains("plus") {
        Section::Preferred
    } else if contains_any(heading, REQUIRED_HEADINGS) || heading.contains("required") {
        Section::Required
    } else {
        Section::Other
    }
}

fn classify_requirement(lowered: &str) -> RequirementType {
    let degrees = DegreeSet::classify(lowered);
    if degrees != DegreeSet::default() || lowered.contains("degree") {
        RequirementType::Education
    } else if lowered.contains("years") || lowered.contains("experience") {
        RequirementType::Experience
    } else {
        RequirementType::Skill
    }
}
