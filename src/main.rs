use llah::{DiscretizationParams, LlahOperations, LlahParams};
use nalgebra::{Point2, Rotation2, Vector2};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> llah::Result<()> {
    // Demo: registers three synthetic marker layouts, then looks up a rotated,
    // scaled and cropped view of the second one.
    let layouts: Vec<Vec<Point2<f64>>> = (0..3).map(|seed| layout(seed, 6, 5)).collect();

    let mut ops = LlahOperations::new(LlahParams::affine(6))?;
    ops.learn_hashing(&layouts, &DiscretizationParams::default())?;
    for landmarks in &layouts {
        ops.create_document(landmarks)?;
    }

    let rotation = Rotation2::new(0.4);
    let shift = Vector2::new(120.0, -35.0);
    let observed: Vec<Point2<f64>> = layouts[1]
        .iter()
        .take(24)
        .map(|p| Point2::from(rotation * (p.coords * 1.7) + shift))
        .collect();

    let mut workspace = ops.create_workspace();
    let (found, report) = ops.lookup_documents_with_diagnostics(&mut workspace, &observed, 10)?;
    println!(
        "documents={} features={} votes={} latency_ms={:.3}",
        ops.documents().len(),
        ops.hash_table().len(),
        report.voting.votes_cast,
        report.timings.total_ms
    );
    for doc in found {
        println!(
            "  document {} seen={}/{} hits={}",
            doc.document_id,
            doc.count_seen_landmarks(),
            doc.landmark_hits.len(),
            doc.count_hits()
        );
    }
    Ok(())
}

/// Jittered `cols x rows` grid whose perturbation depends on `seed`.
fn layout(seed: usize, cols: usize, rows: usize) -> Vec<Point2<f64>> {
    let mut points = Vec::with_capacity(cols * rows);
    for r in 0..rows {
        for c in 0..cols {
            let k = (seed * 1000 + r * cols + c) as f64;
            points.push(Point2::new(
                c as f64 * 20.0 + (k * 12.9898).sin() * 5.0,
                r as f64 * 20.0 + (k * 78.233).cos() * 5.0,
            ));
        }
    }
    points
}
