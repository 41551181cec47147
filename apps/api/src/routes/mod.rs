pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze_job;
use crate::errors::AppError;
use crate::render::handlers::handle_render_latex;
use crate::scoring::handlers::handle_score;
use crate::selection::handlers::handle_select_content;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring
        .route("/api/v1/ats/score", post(handle_score))
        // Job analysis
        .route("/api/v1/jobs/analyze", post(handle_analyze_job))
        // Tailoring and rendering
        .route("/api/v1/resumes/select", post(handle_select_content))
        .route("/api/v1/resumes/latex", post(handle_render_latex))
        .fallback(not_found)
        .with_state(state)
}
