//! Axum route handlers for content selection.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{CandidateProfile, JobAnalysis};
use crate::selection::{select_content, SelectionLimits, SelectionResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectContentRequest {
    #[serde(default)]
    pub profile: Option<CandidateProfile>,
    #[serde(default)]
    pub job_analysis: Option<JobAnalysis>,
    /// Overrides the configured section limits for this request.
    #[serde(default)]
    pub limits: Option<SelectionLimits>,
}

/// POST /api/v1/resumes/select
///
/// Ranks profile items against the job and returns the tailored profile
/// together with per-item scores and exclusion reasons.
pub async fn handle_select_content(
    State(state): State<AppState>,
    payload: Result<Json<SelectContentRequest>, JsonRejection>,
) -> Result<Json<SelectionResult>, AppError> {
    let Json(request) = payload?;
    let profile = request
        .profile
        .ok_or_else(|| AppError::InvalidArgument("profile is required".to_string()))?;
    let job = request
        .job_analysis
        .ok_or_else(|| AppError::InvalidArgument("jobAnalysis is required".to_string()))?;
    let limits = request
        .limits
        .unwrap_or(state.config.selection_limits);

    let result = select_content(
        &profile,
        &job,
        &limits,
        state.config.match_mode,
        Utc::now().date_naive(),
    );

    info!(
        "Selected {} items ({} excluded) for '{}'",
        result.selected.len(),
        result.excluded.len(),
        job.position
    );

    Ok(Json(result))
}
