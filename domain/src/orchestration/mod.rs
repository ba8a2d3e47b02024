//! Orchestration domain
//!
//! Execution modes for running specialists and the aggregated response
//! produced at the end of a run.

pub mod mode;
pub mod response;
