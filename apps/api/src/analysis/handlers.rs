//! Axum route handlers for job-description analysis.

use axum::{extract::rejection::JsonRejection, Json};
use tracing::info;

use crate::analysis::jd_analyzer::{analyze_job_description, AnalyzeJobRequest};
use crate::errors::AppError;
use crate::models::JobAnalysis;

/// POST /api/v1/jobs/analyze
///
/// Extracts skills, keywords, requirements and seniority from a raw JD.
/// The result can be edited client-side before scoring.
pub async fn handle_analyze_job(
    payload: Result<Json<AnalyzeJobRequest>, JsonRejection>,
) -> Result<Json<JobAnalysis>, AppError> {
    let Json(request) = payload?;

    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let analysis = analyze_job_description(&request);
    info!(
        "Analyzed JD '{}': level={}, {} skills, {} keywords, {} requirements",
        analysis.position,
        analysis.experience_level,
        analysis.skills.len(),
        analysis.keywords.len(),
        analysis.requirements.len()
    );

    Ok(Json(analysis))
}
