use nalgebra::{Point2, Rotation2, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `cols x rows` grid with each point displaced by up to `jitter · spacing`.
///
/// Jitter below 0.5 keeps points distinct; any non-zero jitter avoids the
/// collinear triples and equidistant neighbors of a perfect grid.
pub fn jittered_grid(
    seed: u64,
    cols: usize,
    rows: usize,
    spacing: f64,
    jitter: f64,
) -> Vec<Point2<f64>> {
    assert!(jitter < 0.5, "jitter must keep grid cells disjoint");
    let mut rng = StdRng::seed_from_u64(seed);
    let amplitude = jitter * spacing;
    let mut points = Vec::with_capacity(cols * rows);
    for r in 0..rows {
        for c in 0..cols {
            points.push(Point2::new(
                c as f64 * spacing + rng.gen_range(-amplitude..amplitude),
                r as f64 * spacing + rng.gen_range(-amplitude..amplitude),
            ));
        }
    }
    points
}

/// Rotates by `angle`, scales by `scale`, then translates by `shift`.
pub fn similarity(
    points: &[Point2<f64>],
    angle: f64,
    scale: f64,
    shift: Vector2<f64>,
) -> Vec<Point2<f64>> {
    let rotation = Rotation2::new(angle);
    points
        .iter()
        .map(|p| Point2::from(rotation * (p.coords * scale) + shift))
        .collect()
}

/// Offsets every point by `shift`.
pub fn translate(points: &[Point2<f64>], shift: Vector2<f64>) -> Vec<Point2<f64>> {
    points.iter().map(|p| p + shift).collect()
}

/// Two jittered grids separated by `gap` along x, concatenated.
///
/// Each point's nearest neighbors stay inside its own cluster as long as each
/// cluster has more points than the neighbor count and `gap` dwarfs the spacing.
pub fn two_clusters(seed: u64, cols: usize, rows: usize, spacing: f64, gap: f64) -> Vec<Point2<f64>> {
    let mut points = jittered_grid(seed, cols, rows, spacing, 0.2);
    let far = jittered_grid(seed.wrapping_add(1), cols, rows, spacing, 0.2);
    points.extend(translate(&far, Vector2::new(gap, 0.0)));
    points
}
