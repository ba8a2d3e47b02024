//! Recommendations and their prioritization.
//!
//! A recommendation's priority score is always derived from its impact and
//! effort levels (see [`scoring::priority_score`]); it is never an input.

pub mod entities;
pub mod levels;
pub mod ranking;
pub mod scoring;
