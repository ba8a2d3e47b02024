//! Recommendation ranking
//!
//! Candidates must be supplied in extraction order: specialist registration
//! order first, then each specialist's emission order. The sort is stable, so
//! equal scores keep that order.

use super::entities::{RankedRecommendation, Recommendation};
use super::scoring::priority_level;

/// Rank candidates by descending priority score.
pub fn rank_recommendations(candidates: Vec<Recommendation>) -> Vec<RankedRecommendation> {
    let mut scored: Vec<(u8, Recommendation)> = candidates
        .into_iter()
        .map(|r| (r.priority_score(), r))
        .collect();

    // Vec::sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, recommendation))| {
            let rank = i + 1;
            RankedRecommendation {
                recommendation,
                priority_score: score,
                priority_rank: rank,
                priority_level: priority_level(rank, score),
            }
        })
        .collect()
}
