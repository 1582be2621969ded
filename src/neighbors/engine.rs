use super::search::{NearestNeighborSearch, NeighborSearchKind};
use crate::combinations::Combinations;
use nalgebra::Point2;
use smallvec::SmallVec;

/// Ordered tuple yielded by [`FeatureSets`].
pub type FeatureTuple = SmallVec<[Point2<f64>; 8]>;

/// Finds the N nearest neighbors of a point and orders them by polar angle.
///
/// Holds the k-NN index of the current point set plus reusable buffers, so a
/// single engine serves one point set at a time.
pub struct NeighborEngine {
    number_of_neighbors: usize,
    search: Box<dyn NearestNeighborSearch>,
    nearest: Vec<usize>,
    ordered: Vec<(f64, Point2<f64>)>,
    neighbors: Vec<Point2<f64>>,
}

impl NeighborEngine {
    pub fn new(number_of_neighbors: usize, kind: NeighborSearchKind) -> Self {
        Self {
            number_of_neighbors,
            search: kind.build(),
            nearest: Vec::with_capacity(number_of_neighbors + 1),
            ordered: Vec::with_capacity(number_of_neighbors + 1),
            neighbors: Vec::with_capacity(number_of_neighbors + 1),
        }
    }

    pub fn number_of_neighbors(&self) -> usize {
        self.number_of_neighbors
    }

    /// Indexes `points` for subsequent [`find_neighbors`](Self::find_neighbors) calls.
    pub fn set_points(&mut self, points: &[Point2<f64>]) {
        self.search.set_points(points);
    }

    /// Returns up to N neighbors of `points[target]` sorted by ascending angle.
    ///
    /// The target is excluded by index, so a distinct point at the same
    /// location is still a valid neighbor. Fewer than N neighbors come back
    /// only when `points` holds fewer than N + 1 entries.
    pub fn find_neighbors(&mut self, points: &[Point2<f64>], target: usize) -> &[Point2<f64>] {
        let center = points[target];
        self.search
            .find_nearest(&center, self.number_of_neighbors + 1, &mut self.nearest);

        self.ordered.clear();
        for &idx in &self.nearest {
            if idx == target || self.ordered.len() == self.number_of_neighbors {
                continue;
            }
            let p = points[idx];
            let angle = (p.y - center.y).atan2(p.x - center.x);
            self.ordered.push((angle, p));
        }
        // stable, so equal angles keep their distance order
        self.ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

        self.neighbors.clear();
        self.neighbors.extend(self.ordered.iter().map(|(_, p)| *p));
        &self.neighbors
    }
}

/// Every M-subset of the neighbors in lexicographic order, each followed by
/// all M of its cyclic rotations.
///
/// Yields `C(N, M) · M` tuples. Rotation `i` starts the subset at offset `i`,
/// since the neighbor that came first at registration is unknown at query time.
pub struct FeatureSets<'a> {
    neighbors: &'a [Point2<f64>],
    combinations: Combinations,
    size: usize,
    rotation: usize,
}

impl<'a> FeatureSets<'a> {
    pub fn new(neighbors: &'a [Point2<f64>], size: usize) -> Self {
        Self {
            neighbors,
            combinations: Combinations::new(neighbors.len(), size),
            size,
            rotation: 0,
        }
    }
}

impl Iterator for FeatureSets<'_> {
    type Item = FeatureTuple;

    fn next(&mut self) -> Option<FeatureTuple> {
        let subset = self.combinations.current()?;
        let tuple = (0..self.size)
            .map(|j| self.neighbors[subset[(self.rotation + j) % self.size]])
            .collect();
        self.rotation += 1;
        if self.rotation == self.size {
            self.rotation = 0;
            self.combinations.advance();
        }
        Some(tuple)
    }
}

/// Shorthand for [`FeatureSets::new`].
pub fn enumerate_feature_sets(neighbors: &[Point2<f64>], size: usize) -> FeatureSets<'_> {
    FeatureSets::new(neighbors, size)
}
