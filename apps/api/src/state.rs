use std::sync::Arc;

use crate::config::Config;
use crate::scoring::AtsScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data: every endpoint is a pure computation.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable scorer. Default: HeuristicAtsScorer, match mode from ATS_MATCH_MODE.
    pub scorer: Arc<dyn AtsScorer>,
}
