use crate::models::ScoredPlatform;

/// Orders scored entries: every feasible entry first, then descending score
///
/// The sort is stable, so equal scores keep catalog order.
pub fn rank(mut entries: Vec<ScoredPlatform>) -> Vec<ScoredPlatform> {
    entries.sort_by(|a, b| {
        b.feasible
            .cmp(&a.feasible)
            .then_with(|| b.score.total_cmp(&a.score))
    });
    entries
}
