//! Geometric invariants computed from ordered point tuples.
//!
//! Both variants are ratios of triangle areas, which makes them unchanged by
//! the transform class they target:
//! - [`LlahInvariant::Affine`]: 4 points, invariant to affine maps.
//! - [`LlahInvariant::CrossRatio`]: 5 coplanar points, invariant to projective maps.
//!
//! Near-degenerate tuples (collinear or coincident points) divide by values
//! close to zero. The result is returned as-is and may be `inf` or `NaN`; the
//! discretizer maps every non-finite value to its top level.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Which invariant is computed for each k-subset of a feature tuple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LlahInvariant {
    Affine,
    #[default]
    CrossRatio,
}

impl LlahInvariant {
    /// Number of points consumed by one invariant.
    pub fn sample_size(&self) -> usize {
        match self {
            LlahInvariant::Affine => 4,
            LlahInvariant::CrossRatio => 5,
        }
    }

    /// Computes the invariant of an ordered tuple of exactly `sample_size()` points.
    pub fn compute(&self, points: &[Point2<f64>]) -> f64 {
        debug_assert_eq!(points.len(), self.sample_size());
        match self {
            LlahInvariant::Affine => affine(&points[0], &points[1], &points[2], &points[3]),
            LlahInvariant::CrossRatio => {
                cross_ratio(&points[0], &points[1], &points[2], &points[3], &points[4])
            }
        }
    }
}

/// Twice the signed area of the triangle `(a, b, c)`.
#[inline]
pub fn triangle_area2(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b - a).perp(&(c - a))
}

/// Ratio of the areas of triangles `(a, c, d)` and `(a, b, c)`.
pub fn affine(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>, d: &Point2<f64>) -> f64 {
    triangle_area2(a, c, d).abs() / triangle_area2(a, b, c).abs()
}

/// Five-point cross ratio `P(a,b,c)·P(a,d,e) / (P(a,b,d)·P(a,c,e))`.
pub fn cross_ratio(
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
    d: &Point2<f64>,
    e: &Point2<f64>,
) -> f64 {
    let num = triangle_area2(a, b, c) * triangle_area2(a, d, e);
    let den = triangle_area2(a, b, d) * triangle_area2(a, c, e);
    num.abs() / den.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix2, Matrix3, Vector2};

    fn pts(raw: &[[f64; 2]]) -> Vec<Point2<f64>> {
        raw.iter().map(|p| Point2::new(p[0], p[1])).collect()
    }

    #[test]
    fn affine_of_unit_square() {
        let p = pts(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert_relative_eq!(LlahInvariant::Affine.compute(&p), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn affine_is_unchanged_by_affine_map() {
        let p = pts(&[[0.1, 0.2], [2.0, 0.3], [1.7, 1.9], [0.4, 1.4]]);
        let a = Matrix2::new(1.3, 0.4, -0.2, 0.8);
        let t = Vector2::new(5.0, -3.0);
        let q: Vec<Point2<f64>> = p.iter().map(|v| Point2::from(a * v.coords + t)).collect();
        assert_relative_eq!(
            LlahInvariant::Affine.compute(&p),
            LlahInvariant::Affine.compute(&q),
            max_relative = 1e-10
        );
    }

    #[test]
    fn cross_ratio_is_unchanged_by_homography() {
        let p = pts(&[[0.0, 0.0], [3.0, 0.5], [2.5, 2.0], [0.5, 3.0], [-1.0, 1.5]]);
        let h = Matrix3::new(0.9, 0.1, 2.0, -0.2, 1.1, 1.0, 0.01, 0.02, 1.0);
        let q: Vec<Point2<f64>> = p
            .iter()
            .map(|v| {
                let w = h * v.to_homogeneous();
                Point2::new(w[0] / w[2], w[1] / w[2])
            })
            .collect();
        assert_relative_eq!(
            LlahInvariant::CrossRatio.compute(&p),
            LlahInvariant::CrossRatio.compute(&q),
            max_relative = 1e-9
        );
    }

    #[test]
    fn collinear_base_is_not_finite() {
        let p = pts(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [0.0, 1.0]]);
        assert!(!LlahInvariant::Affine.compute(&p).is_finite());
    }

    #[test]
    fn sample_sizes() {
        assert_eq!(LlahInvariant::Affine.sample_size(), 4);
        assert_eq!(LlahInvariant::CrossRatio.sample_size(), 5);
    }
}
