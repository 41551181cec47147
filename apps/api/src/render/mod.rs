//! Resume rendering. Produces LaTeX source only; compilation to PDF happens
//! outside this service.

pub mod handlers;
pub mod latex;
