use anyhow::{bail, Context, Result};

use crate::scoring::keywords::MatchMode;
use crate::selection::SelectionLimits;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// `ATS_MATCH_MODE`: `substring` (default) or `word_boundary`.
    pub match_mode: MatchMode,
    pub selection_limits: SelectionLimits,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SelectionLimits::default();

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            match_mode: match lookup("ATS_MATCH_MODE") {
                None => MatchMode::default(),
                Some(raw) => parse_match_mode(&raw)?,
            },
            selection_limits: SelectionLimits {
                max_experiences: parse_or(
                    &lookup,
                    "SELECTION_MAX_EXPERIENCES",
                    defaults.max_experiences,
                )?,
                max_projects: parse_or(&lookup, "SELECTION_MAX_PROJECTS", defaults.max_projects)?,
                max_skills: parse_or(&lookup, "SELECTION_MAX_SKILLS", defaults.max_skills)?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
    }
}

fn parse_match_mode(raw: &str) -> Result<MatchMode> {
    match raw.trim().to_lowercase().as_str() {
        "substring" => Ok(MatchMode::Substring),
        "word_boundary" | "word-boundary" => Ok(MatchMode::WordBoundary),
        other => bail!("ATS_MATCH_MODE must be 'substring' or 'word_boundary', got '{other}'"),
    }
}
