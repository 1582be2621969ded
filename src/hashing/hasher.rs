use super::discretizer::Discretizer;
use crate::combinations::Combinations;
use crate::error::{LlahError, Result};
use crate::feature::FeatureSignature;
use crate::invariant::LlahInvariant;
use nalgebra::Point2;
use smallvec::SmallVec;

/// Turns an ordered M-tuple into discretized invariants and a hash code.
///
/// One invariant is computed per k-subset of the tuple (k being the
/// invariant's sample size), in lexicographic subset order. The discretized
/// levels are folded positionally: `Σ level[i]·K^i mod table_size`.
#[derive(Clone, Debug)]
pub struct LlahHasher {
    invariant: LlahInvariant,
    hash_k: u64,
    hash_table_size: u32,
    subsets: Vec<SmallVec<[usize; 5]>>,
    discretizer: Discretizer,
}

impl LlahHasher {
    /// `combination_size` is M, the number of points handed to [`compute_hash`](Self::compute_hash).
    pub fn new(
        invariant: LlahInvariant,
        combination_size: usize,
        hash_k: u64,
        hash_table_size: u32,
    ) -> Result<Self> {
        let k = invariant.sample_size();
        if combination_size < k {
            return Err(LlahError::InvalidParameter(format!(
                "combination size {combination_size} is smaller than the {k} points the invariant needs"
            )));
        }
        if hash_k == 0 {
            return Err(LlahError::InvalidParameter("hash_k must be at least 1".into()));
        }
        if hash_table_size == 0 {
            return Err(LlahError::InvalidParameter(
                "hash_table_size must be at least 1".into(),
            ));
        }
        let subsets = Combinations::collect_all(combination_size, k)
            .into_iter()
            .map(SmallVec::from_vec)
            .collect();
        Ok(Self {
            invariant,
            hash_k,
            hash_table_size,
            subsets,
            discretizer: Discretizer::default(),
        })
    }

    pub fn invariant(&self) -> LlahInvariant {
        self.invariant
    }

    /// Length of every feature's invariant array: `C(M, k)`.
    pub fn number_of_invariants(&self) -> usize {
        self.subsets.len()
    }

    pub fn hash_k(&self) -> u64 {
        self.hash_k
    }

    pub fn hash_table_size(&self) -> u32 {
        self.hash_table_size
    }

    pub fn discretizer(&self) -> &Discretizer {
        &self.discretizer
    }

    pub fn set_discretizer(&mut self, discretizer: Discretizer) {
        self.discretizer = discretizer;
    }

    pub fn learn_discretization(
        &mut self,
        histogram: &[u32],
        max_value: f64,
        num_discrete: u32,
    ) -> Result<()> {
        self.discretizer = Discretizer::learn(histogram, max_value, num_discrete)?;
        Ok(())
    }

    /// Writes the continuous invariants of `points` into `out`.
    pub fn compute_invariants(&self, points: &[Point2<f64>], out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.subsets.len());
        let mut sample: SmallVec<[Point2<f64>; 5]> = SmallVec::new();
        for (value, subset) in out.iter_mut().zip(&self.subsets) {
            sample.clear();
            sample.extend(subset.iter().map(|&i| points[i]));
            *value = self.invariant.compute(&sample);
        }
    }

    /// Discretizes the invariants of `points` and folds them into `out.hash_code`.
    ///
    /// `scratch` must hold [`number_of_invariants`](Self::number_of_invariants) values.
    pub fn compute_hash(
        &self,
        points: &[Point2<f64>],
        scratch: &mut [f64],
        out: &mut FeatureSignature,
    ) {
        self.compute_invariants(points, scratch);
        out.invariants.resize(scratch.len(), 0);
        for (level, &value) in out.invariants.iter_mut().zip(scratch.iter()) {
            *level = self.discretizer.discretize(value);
        }
        out.hash_code = self.fold(&out.invariants);
    }

    /// Positional hash of discretized levels, reduced modulo the table size.
    pub fn fold(&self, levels: &[u32]) -> u32 {
        let modulus = self.hash_table_size as u64;
        let mut hash = 0u64;
        let mut weight = 1u64 % modulus;
        for &level in levels {
            hash = (hash + (level as u64 % modulus) * weight) % modulus;
            weight = weight * (self.hash_k % modulus) % modulus;
        }
        hash as u32
    }
}
