// Job description analysis: pasted JD text in, `JobAnalysis` out.
// Heuristic only; the scorer consumes whatever this produces.

pub mod handlers;
pub mod jd_analyzer;
