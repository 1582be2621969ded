//! Per-caller scratch state reused across lookups.
//!
//! A workspace holds the k-NN index of the observed points, the voting
//! booths and the pooled [`FoundDocument`] results. Giving each thread its own
//! workspace lets several threads query one shared, fully registered
//! [`LlahOperations`](super::LlahOperations).

use super::found::FoundDocument;
use crate::feature::FeatureSignature;
use crate::neighbors::{NeighborEngine, NeighborSearchKind};
use std::collections::HashMap;

/// One candidate `(document, landmark)` in a voting booth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoothEntry {
    pub document_id: u32,
    pub landmark_id: u32,
    pub votes: u32,
}

/// Per-observed-point tally of matching `(document, landmark)` pairs.
///
/// Entries are kept in first-vote order, which is what breaks ties.
#[derive(Clone, Debug, Default)]
pub struct VotingBooth {
    entries: Vec<BoothEntry>,
    index: HashMap<(u32, u32), usize>,
}

impl VotingBooth {
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    pub fn vote(&mut self, document_id: u32, landmark_id: u32) {
        let next = self.entries.len();
        let slot = *self.index.entry((document_id, landmark_id)).or_insert(next);
        if slot == next {
            self.entries.push(BoothEntry {
                document_id,
                landmark_id,
                votes: 0,
            });
        }
        self.entries[slot].votes += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[BoothEntry] {
        &self.entries
    }

    /// Candidate with the strictly highest count; the earliest wins ties.
    pub fn winner(&self) -> Option<BoothEntry> {
        let mut best: Option<BoothEntry> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.votes > b.votes) {
                best = Some(*entry);
            }
        }
        best
    }
}

/// Scratch memory for one lookup caller. Not meant to be shared across threads.
pub struct LlahWorkspace {
    pub(crate) engine: NeighborEngine,
    pub(crate) invariants: Vec<f64>,
    pub(crate) signature: FeatureSignature,
    pub(crate) booths: Vec<VotingBooth>,
    pub(crate) found: Vec<FoundDocument>,
    pub(crate) found_by_document: HashMap<u32, usize>,
    pub(crate) active: usize,
}

impl LlahWorkspace {
    pub fn new(
        number_of_neighbors: usize,
        number_of_invariants: usize,
        search: NeighborSearchKind,
    ) -> Self {
        Self {
            engine: NeighborEngine::new(number_of_neighbors, search),
            invariants: vec![0.0; number_of_invariants],
            signature: FeatureSignature::new(number_of_invariants),
            booths: Vec::new(),
            found: Vec::new(),
            found_by_document: HashMap::new(),
            active: 0,
        }
    }

    /// Prepares booths for `points` observed points and recycles previous results.
    pub(crate) fn reset(&mut self, points: usize) {
        if self.booths.len() < points {
            self.booths.resize_with(points, VotingBooth::default);
        }
        for booth in &mut self.booths[..points] {
            booth.clear();
        }
        self.found_by_document.clear();
        self.active = 0;
    }

    /// Result slot for `document_id`, created on first use.
    pub(crate) fn found_for(&mut self, document_id: u32, total_landmarks: usize) -> &mut FoundDocument {
        let slot = match self.found_by_document.get(&document_id) {
            Some(&slot) => slot,
            None => {
                let slot = self.active;
                if slot == self.found.len() {
                    self.found.push(FoundDocument::default());
                }
                self.found[slot].init(document_id, total_landmarks);
                self.found_by_document.insert(document_id, slot);
                self.active += 1;
                slot
            }
        };
        &mut self.found[slot]
    }

    /// Results of the most recent lookup.
    pub fn results(&self) -> &[FoundDocument] {
        &self.found[..self.active]
    }
}
