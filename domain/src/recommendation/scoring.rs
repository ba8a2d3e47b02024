//! Priority scoring
//!
//! ```text
//! priority_score(impact, effort) = impact_weight(impact) * 3 + (4 - effort_weight(effort))
//! ```
//!
//! High impact / low effort scores 12 (the maximum), low impact / high effort
//! scores 4 (the minimum).

use super::levels::{EffortLevel, ImpactLevel, PriorityLevel};

/// Highest achievable score
pub const MAX_PRIORITY_SCORE: u8 = 12;

/// Lowest achievable score
pub const MIN_PRIORITY_SCORE: u8 = 4;

/// Compute the priority score of an (impact, effort) pair
pub fn priority_score(impact: ImpactLevel, effort: EffortLevel) -> u8 {
    impact.weight() * 3 + (4 - effort.weight())
}

/// Minimum score for rank 2 to stay Critical
pub const CRITICAL_SCORE_THRESHOLD: u8 = 10;

/// Tier assigned by 1-based rank: 1-2 Critical, 3-4 High, else Medium.
///
/// The top entry is always Critical. The runner-up is Critical only when it
/// reaches [`CRITICAL_SCORE_THRESHOLD`], otherwise it is High.
pub fn priority_level(rank: usize, score: u8) -> PriorityLevel {
    match rank {
        0..=1 => PriorityLevel::Critical,
        2 if score >= CRITICAL_SCORE_THRESHOLD => PriorityLevel::Critical,
        2..=4 => PriorityLevel::High,
        _ => PriorityLevel::Medium,
    }
}
