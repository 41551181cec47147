//! Axum route handlers for resume rendering.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::{CandidateProfile, JobAnalysis};
use crate::render::latex::render_resume_latex;
use crate::selection::select_content;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderLatexRequest {
    #[serde(default)]
    pub profile: Option<CandidateProfile>,
    /// When present, the profile is tailored to this job before rendering.
    #[serde(default)]
    pub job_analysis: Option<JobAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct RenderLatexResponse {
    pub latex: String,
}

/// POST /api/v1/resumes/latex
pub async fn handle_render_latex(
    State(state): State<AppState>,
    payload: Result<Json<RenderLatexRequest>, JsonRejection>,
) -> Result<Json<RenderLatexResponse>, AppError> {
    let Json(request) = payload?;
    let profile = request
        .profile
        .ok_or_else(|| AppError::InvalidArgument("profile is required".to_string()))?;

    let profile = match &request.job_analysis {
        Some(job) => {
            select_content(
                &profile,
                job,
                &state.config.selection_limits,
                state.config.match_mode,
                Utc::now().date_naive(),
            )
            .tailored_profile
        }
        None => profile,
    };

    let latex = render_resume_latex(&profile);
    info!(
        "Rendered LaTeX resume ({} bytes, tailored: {})",
        latex.len(),
        request.job_analysis.is_some()
    );

    Ok(Json(RenderLatexResponse { latex }))
}
