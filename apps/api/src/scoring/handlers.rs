//! Axum route handlers for the ATS scoring API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::scoring::{AtsScoreRequest, AtsScoreResult};
use crate::state::AppState;

/// POST /api/v1/ats/score
///
/// Scores a candidate profile against an analysed job description.
/// Both `profile` and `jobAnalysis` are required.
pub async fn handle_score(
    State(state): State<AppState>,
    payload: Result<Json<AtsScoreRequest>, JsonRejection>,
) -> Result<Json<AtsScoreResult>, AppError> {
    let Json(request) = payload?;
    let (profile, job) = request.into_parts()?;

    let result = state.scorer.score(&profile, &job);

    info!(
        "ATS score {}/100 for '{}' ({}): keywords {}, experience {}, format {}, education {}",
        result.overall,
        job.position,
        state.scorer.backend(),
        result.breakdown.keyword_match,
        result.breakdown.experience_relevance,
        result.breakdown.format_parseability,
        result.breakdown.education_match
    );

    Ok(Json(result))
}
