use approx::relative_eq;
use llah::combinations::{total_combinations, Combinations};
use llah::hashing::Discretizer;
use llah::invariant::LlahInvariant;
use llah::neighbors::enumerate_feature_sets;
use nalgebra::{Matrix2, Point2, Vector2};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point2<f64>> {
    (-100.0..100.0f64, -100.0..100.0f64).prop_map(|(x, y)| Point2::new(x, y))
}

/// Tuples whose triangles are far from degenerate.
fn well_spread(n: usize) -> impl Strategy<Value = Vec<Point2<f64>>> {
    prop::collection::vec(point(), n).prop_filter("near-degenerate tuple", |pts| {
        for i in 0..pts.len() {
            for j in (i + 1)..pts.len() {
                for k in (j + 1)..pts.len() {
                    let area = (pts[j] - pts[i]).perp(&(pts[k] - pts[i])).abs();
                    if area < 50.0 {
                        return false;
                    }
                }
            }
        }
        true
    })
}

proptest! {
    #[test]
    fn discretize_is_monotone(
        mut boundaries in prop::collection::vec(-10.0..10.0f64, 1..40),
        a in -20.0..20.0f64,
        b in -20.0..20.0f64,
    ) {
        boundaries.sort_by(f64::total_cmp);
        let d = Discretizer::from_boundaries(boundaries).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(d.discretize(lo) <= d.discretize(hi));
        prop_assert!(d.discretize(hi) < d.num_discrete());
    }

    #[test]
    fn affine_invariant_survives_affine_maps(
        pts in well_spread(4),
        a in (0.3..3.0f64, -1.0..1.0f64, -1.0..1.0f64, 0.3..3.0f64),
        shift in (-50.0..50.0f64, -50.0..50.0f64),
    ) {
        let m = Matrix2::new(a.0, a.1, a.2, a.3);
        prop_assume!(m.determinant().abs() > 0.1);
        let t = Vector2::new(shift.0, shift.1);
        let mapped: Vec<_> = pts.iter().map(|p| Point2::from(m * p.coords + t)).collect();
        let before = LlahInvariant::Affine.compute(&pts);
        let after = LlahInvariant::Affine.compute(&mapped);
        prop_assert!(relative_eq!(before, after, max_relative = 1e-9));
    }

    #[test]
    fn feature_sets_cover_every_rotated_subset(n in 4usize..9, m in 1usize..5) {
        prop_assume!(m <= n);
        let neighbors: Vec<_> = (0..n).map(|i| Point2::new(i as f64, 0.0)).collect();
        let count = enumerate_feature_sets(&neighbors, m).count() as u64;
        prop_assert_eq!(count, total_combinations(n, m) * m as u64);
    }

    #[test]
    fn combinations_are_lexicographic(n in 1usize..9, k in 1usize..5) {
        prop_assume!(k <= n);
        let all = Combinations::collect_all(n, k);
        prop_assert_eq!(all.len() as u64, total_combinations(n, k));
        for pair in all.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for c in &all {
            prop_assert!(c.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
