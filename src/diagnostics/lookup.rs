use super::timing::TimingBreakdown;
use serde::Serialize;

/// Counters gathered while voting on one set of observed points.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingStats {
    /// Ordered tuples enumerated over all observed points.
    pub feature_sets: usize,
    /// Stored records inspected while walking hash chains.
    pub chain_entries: usize,
    /// Stored records rejected because only the hash code matched.
    pub hash_collisions: usize,
    /// Stored records whose invariants matched exactly; each cast one vote.
    pub votes_cast: usize,
    /// Observed points that received at least one vote.
    pub voting_points: usize,
}

/// Report returned by
/// [`LlahOperations::lookup_documents_with_diagnostics`](crate::ops::LlahOperations::lookup_documents_with_diagnostics).
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupReport {
    pub observed_points: usize,
    pub min_landmarks: usize,
    pub voting: VotingStats,
    /// Documents that won at least one observed point.
    pub candidate_documents: usize,
    /// Documents that cleared `min_landmarks`.
    pub accepted_documents: usize,
    pub timings: TimingBreakdown,
}

impl LookupReport {
    /// Fraction of inspected chain entries that were hash-only collisions.
    pub fn collision_ratio(&self) -> f64 {
        if self.voting.chain_entries == 0 {
            0.0
        } else {
            self.voting.hash_collisions as f64 / self.voting.chain_entries as f64
        }
    }
}
