//! Parameter types configuring feature computation and hash learning.
//!
//! Defaults follow the usual LLAH marker setup: 7 neighbors, 5-point
//! combinations and the projective cross ratio. For document-style affine
//! retrieval use `LlahInvariant::Affine` with a combination size of 4 or more.

use crate::invariant::LlahInvariant;
use crate::neighbors::NeighborSearchKind;
use serde::{Deserialize, Serialize};

/// Structural knobs of the feature pipeline. Fixed for the lifetime of an
/// [`LlahOperations`](super::LlahOperations) instance.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LlahParams {
    /// Neighbors sampled around each point (N). Larger is more discriminative
    /// but grows the work by `C(N, M)`.
    pub number_of_neighbors: usize,
    /// Points taken from the neighbors per feature (M), at least the
    /// invariant's sample size.
    pub size_of_combination: usize,
    pub invariant: LlahInvariant,
    /// Base K of the positional hash fold.
    pub hash_k: u64,
    /// Number of hash codes; trades collisions for memory.
    pub hash_table_size: u32,
    pub neighbor_search: NeighborSearchKind,
}

impl Default for LlahParams {
    fn default() -> Self {
        Self {
            number_of_neighbors: 7,
            size_of_combination: 5,
            invariant: LlahInvariant::CrossRatio,
            hash_k: 25,
            hash_table_size: 12_800_000,
            neighbor_search: NeighborSearchKind::KdTree,
        }
    }
}

impl LlahParams {
    /// Affine setup with M equal to the affine sample size.
    pub fn affine(number_of_neighbors: usize) -> Self {
        Self {
            number_of_neighbors,
            size_of_combination: LlahInvariant::Affine.sample_size(),
            invariant: LlahInvariant::Affine,
            ..Default::default()
        }
    }
}

/// Inputs to [`learn_hashing`](super::LlahOperations::learn_hashing).
///
/// These tune quantization quality, not correctness.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscretizationParams {
    /// Number of levels each invariant is quantized to.
    pub num_discrete: u32,
    /// Resolution of the training histogram.
    pub histogram_length: usize,
    /// Largest invariant value the histogram covers; larger values share the last bin.
    pub max_invariant_value: f64,
}

impl Default for DiscretizationParams {
    fn default() -> Self {
        Self {
            num_discrete: 128,
            histogram_length: 100_000,
            max_invariant_value: 25.0,
        }
    }
}
