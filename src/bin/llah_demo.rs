use llah::config::demo::{self, to_points};
use llah::diagnostics::LookupReport;
use llah::io::write_json_file;
use llah::{LlahOperations, LlahParams, PointIndex2D};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = demo::load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;

    let mut ops = LlahOperations::new(config.params.clone()).map_err(|e| e.to_string())?;
    let training = config.training_sets();
    ops.learn_hashing(&training, &config.discretization)
        .map_err(|e| format!("Failed to learn hashing: {e}"))?;

    for (i, raw) in config.documents.iter().enumerate() {
        ops.create_document(&to_points(raw))
            .map_err(|e| format!("Failed to register document {i}: {e}"))?;
    }

    let mut workspace = ops.create_workspace();
    let mut queries = Vec::with_capacity(config.queries.len());
    let mut matches = Vec::new();
    for query in &config.queries {
        let dots = to_points(&query.points);
        let (found, report) = ops
            .lookup_documents_with_diagnostics(&mut workspace, &dots, query.min_landmarks)
            .map_err(|e| format!("Query '{}' failed: {e}", query.name))?;

        let mut documents = Vec::with_capacity(found.len());
        for doc in found {
            let registered = ops
                .document(doc.document_id)
                .ok_or_else(|| format!("Unknown document {}", doc.document_id))?;
            doc.lookup_matches(registered, &mut matches);
            documents.push(FoundDocumentOut {
                document_id: doc.document_id,
                seen_landmarks: doc.count_seen_landmarks(),
                total_hits: doc.count_hits(),
                landmark_to_dots: doc.landmark_to_dots.clone(),
                matches: matches.clone(),
            });
        }
        println!(
            "{}: {} dots -> {} document(s) in {:.3} ms (collision ratio {:.3})",
            query.name,
            dots.len(),
            documents.len(),
            report.timings.total_ms,
            report.collision_ratio()
        );
        queries.push(QueryOut {
            name: query.name.clone(),
            documents,
            collision_ratio: report.collision_ratio(),
            report,
        });
    }

    let result = LlahDemoOutput {
        params: config.params.clone(),
        document_count: ops.documents().len(),
        feature_count: ops.hash_table().len(),
        bucket_count: ops.hash_table().bucket_count(),
        max_unique_hash_per_point: ops.compute_max_unique_hash_per_point(),
        queries,
    };
    write_json_file(&config.output.result_json, &result).map_err(|e| e.to_string())?;
    println!(
        "Saved LLAH result for {} queries to {}",
        result.queries.len(),
        config.output.result_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: llah_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LlahDemoOutput {
    params: LlahParams,
    document_count: usize,
    feature_count: usize,
    bucket_count: usize,
    max_unique_hash_per_point: u64,
    queries: Vec<QueryOut>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryOut {
    name: String,
    documents: Vec<FoundDocumentOut>,
    collision_ratio: f64,
    report: LookupReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FoundDocumentOut {
    document_id: u32,
    seen_landmarks: usize,
    total_hits: u64,
    landmark_to_dots: Vec<Option<usize>>,
    matches: Vec<PointIndex2D>,
}
