//! k-nearest-neighbor services consumed by the neighbor engine.

use kiddo::{KdTree, SquaredEuclidean};
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Point-set k-NN query returning indices into the last set passed to `set_points`.
pub trait NearestNeighborSearch: Send + Sync {
    /// Replaces the searchable point set.
    fn set_points(&mut self, points: &[Point2<f64>]);

    /// Writes the indices of up to `k` points closest to `query`, nearest first.
    fn find_nearest(&self, query: &Point2<f64>, k: usize, out: &mut Vec<usize>);
}

/// Selects the k-NN implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSearchKind {
    #[default]
    KdTree,
    Exhaustive,
}

impl NeighborSearchKind {
    pub fn build(self) -> Box<dyn NearestNeighborSearch> {
        match self {
            NeighborSearchKind::KdTree => Box::new(KdTreeSearch::default()),
            NeighborSearchKind::Exhaustive => Box::new(ExhaustiveSearch::default()),
        }
    }
}

/// Leaf capacity of `kiddo::KdTree<f64, 2>`.
const BUCKET_SIZE: usize = 32;

/// k-d tree backed search.
///
/// A leaf cannot be split when all of its points share the split coordinate,
/// which kiddo treats as a fatal error. Point sets where more than half a
/// bucket shares one x or y value (columns, rows, coincident points) are
/// therefore searched exhaustively instead.
pub struct KdTreeSearch {
    backend: Backend,
}

enum Backend {
    Tree(KdTree<f64, 2>),
    Exhaustive(ExhaustiveSearch),
}

impl Default for KdTreeSearch {
    fn default() -> Self {
        Self {
            backend: Backend::Tree(KdTree::new()),
        }
    }
}

impl KdTreeSearch {
    /// True when the last point set is served by the brute-force fallback.
    pub fn is_exhaustive(&self) -> bool {
        matches!(self.backend, Backend::Exhaustive(_))
    }
}

impl NearestNeighborSearch for KdTreeSearch {
    fn set_points(&mut self, points: &[Point2<f64>]) {
        let shared = max_shared_coordinate(points);
        if shared > BUCKET_SIZE / 2 {
            debug!(
                "KdTreeSearch::set_points points={} shared_coordinate={} -> exhaustive",
                points.len(),
                shared
            );
            let mut fallback = ExhaustiveSearch::default();
            fallback.set_points(points);
            self.backend = Backend::Exhaustive(fallback);
            return;
        }
        let mut tree: KdTree<f64, 2> = KdTree::with_capacity(points.len().max(1));
        for (i, p) in points.iter().enumerate() {
            tree.add(&[p.x, p.y], i as u64);
        }
        self.backend = Backend::Tree(tree);
    }

    fn find_nearest(&self, query: &Point2<f64>, k: usize, out: &mut Vec<usize>) {
        match &self.backend {
            Backend::Tree(tree) => {
                out.clear();
                if k == 0 {
                    return;
                }
                let found = tree.nearest_n::<SquaredEuclidean>(&[query.x, query.y], k);
                out.extend(found.into_iter().map(|n| n.item as usize));
            }
            Backend::Exhaustive(search) => search.find_nearest(query, k, out),
        }
    }
}

/// Largest number of points sharing one x value or one y value.
fn max_shared_coordinate(points: &[Point2<f64>]) -> usize {
    let mut values: Vec<f64> = Vec::with_capacity(points.len());
    let mut best = 0;
    for axis in 0..2 {
        values.clear();
        values.extend(points.iter().map(|p| p.coords[axis]));
        values.sort_by(f64::total_cmp);
        let mut run = 0;
        for i in 0..values.len() {
            if i > 0 && values[i] == values[i - 1] {
                run += 1;
            } else {
                run = 1;
            }
            best = best.max(run);
        }
    }
    best
}

/// Brute-force search; ties in distance are broken by the lower index.
#[derive(Default)]
pub struct ExhaustiveSearch {
    points: Vec<Point2<f64>>,
}

impl NearestNeighborSearch for ExhaustiveSearch {
    fn set_points(&mut self, points: &[Point2<f64>]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    fn find_nearest(&self, query: &Point2<f64>, k: usize, out: &mut Vec<usize>) {
        out.clear();
        let mut ranked: Vec<(f64, usize)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| ((p - query).norm_squared(), i))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        out.extend(ranked.into_iter().take(k).map(|(_, i)| i));
    }
}
