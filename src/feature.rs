//! Feature records stored in the hash index.

/// Position of a [`LlahFeature`] inside the hash table's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub u32);

impl FeatureId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Discretized invariants of one ordered tuple and the hash folded from them.
///
/// The hash code only pre-filters; two signatures describe the same feature
/// when the invariants are equal element by element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureSignature {
    pub invariants: Vec<u32>,
    pub hash_code: u32,
}

impl FeatureSignature {
    pub fn new(number_of_invariants: usize) -> Self {
        Self {
            invariants: vec![0; number_of_invariants],
            hash_code: 0,
        }
    }

    #[inline]
    pub fn invariants_match(&self, other: &[u32]) -> bool {
        self.invariants.as_slice() == other
    }
}

/// Signature attached to one landmark of one registered document.
///
/// Records never change after insertion. `next` links to the following record
/// sharing the same hash code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LlahFeature {
    pub document_id: u32,
    pub landmark_id: u32,
    pub invariants: Vec<u32>,
    pub hash_code: u32,
    pub next: Option<FeatureId>,
}

impl LlahFeature {
    pub fn new(document_id: u32, landmark_id: u32, signature: &FeatureSignature) -> Self {
        Self {
            document_id,
            landmark_id,
            invariants: signature.invariants.clone(),
            hash_code: signature.hash_code,
            next: None,
        }
    }
}
