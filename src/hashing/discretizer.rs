use crate::error::{LlahError, Result};
use log::{debug, warn};

/// Maps a continuous invariant to an integer level in `[0, num_discrete)`.
///
/// The level is the number of learned boundaries the value exceeds. Boundaries
/// are learned from a histogram so each level holds roughly the same share of
/// the training invariants; dense regions get narrow bins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Discretizer {
    boundaries: Vec<f64>,
    learned: bool,
}

impl Discretizer {
    /// Learns equal-population boundaries from `histogram`, whose bins evenly
    /// cover `[0, max_value]`.
    pub fn learn(histogram: &[u32], max_value: f64, num_discrete: u32) -> Result<Self> {
        if num_discrete == 0 {
            return Err(LlahError::InvalidParameter(
                "num_discrete must be at least 1".into(),
            ));
        }
        if histogram.is_empty() {
            return Err(LlahError::InvalidParameter("histogram is empty".into()));
        }
        if !(max_value.is_finite() && max_value > 0.0) {
            return Err(LlahError::InvalidParameter(format!(
                "max_value must be finite and positive, got {max_value}"
            )));
        }
        let total: u64 = histogram.iter().map(|&c| c as u64).sum();
        if total == 0 {
            return Err(LlahError::InvalidParameter(
                "histogram holds no samples".into(),
            ));
        }

        let last = histogram[histogram.len() - 1] as f64 / total as f64;
        let max_allowed = 0.5 / num_discrete as f64;
        if last > max_allowed {
            warn!(
                "last histogram bin holds {:.4} of the mass (> {:.4}); increase the max invariant value",
                last, max_allowed
            );
        }

        let len = histogram.len();
        let mut boundaries = Vec::with_capacity(num_discrete as usize - 1);
        for level in 1..num_discrete as u64 {
            let target = (total - 1) * level / num_discrete as u64;
            let mut cumulative = 0u64;
            let mut bin = 0usize;
            while bin < len {
                cumulative += histogram[bin] as u64;
                if cumulative >= target {
                    break;
                }
                bin += 1;
            }
            boundaries.push(bin.min(len - 1) as f64 * max_value / len as f64);
        }
        debug!(
            "Discretizer::learn samples={} levels={} first={:?} last={:?}",
            total,
            num_discrete,
            boundaries.first(),
            boundaries.last()
        );

        Ok(Self {
            boundaries,
            learned: true,
        })
    }

    /// Uses a caller-supplied boundary table. Values must be finite and ascending.
    pub fn from_boundaries(boundaries: Vec<f64>) -> Result<Self> {
        if boundaries.iter().any(|b| !b.is_finite()) {
            return Err(LlahError::InvalidParameter(
                "discretization boundaries must be finite".into(),
            ));
        }
        if boundaries.windows(2).any(|w| w[1] < w[0]) {
            return Err(LlahError::InvalidParameter(
                "discretization boundaries must be ascending".into(),
            ));
        }
        Ok(Self {
            boundaries,
            learned: true,
        })
    }

    pub fn is_learned(&self) -> bool {
        self.learned
    }

    /// Number of discrete levels, one more than the boundary count.
    pub fn num_discrete(&self) -> u32 {
        self.boundaries.len() as u32 + 1
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Counts the boundaries strictly below `value`. Non-finite values land on the top level.
    #[inline]
    pub fn discretize(&self, value: f64) -> u32 {
        if !value.is_finite() {
            return self.boundaries.len() as u32;
        }
        self.boundaries.partition_point(|&b| b < value) as u32
    }
}
