use crate::error::Result;
use crate::io::read_json_file;
use crate::ops::{DiscretizationParams, LlahParams};
use nalgebra::Point2;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Input of the `llah_demo` binary.
///
/// Point sets are written as arrays of `[x, y]` pairs. When `training` is
/// empty the documents themselves are used to learn the discretization.
#[derive(Debug, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub params: LlahParams,
    #[serde(default)]
    pub discretization: DiscretizationParams,
    #[serde(default)]
    pub training: Vec<Vec<[f64; 2]>>,
    pub documents: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    pub queries: Vec<QueryConfig>,
    pub output: DemoOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct QueryConfig {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    #[serde(default = "default_min_landmarks")]
    pub min_landmarks: usize,
}

#[derive(Debug, Deserialize)]
pub struct DemoOutputConfig {
    #[serde(rename = "result_json")]
    pub result_json: PathBuf,
}

fn default_min_landmarks() -> usize {
    8
}

impl DemoConfig {
    /// Point sets used for learning the discretization.
    pub fn training_sets(&self) -> Vec<Vec<Point2<f64>>> {
        let source = if self.training.is_empty() {
            &self.documents
        } else {
            &self.training
        };
        source.iter().map(|set| to_points(set)).collect()
    }
}

pub fn to_points(raw: &[[f64; 2]]) -> Vec<Point2<f64>> {
    raw.iter().map(|&[x, y]| Point2::new(x, y)).collect()
}

pub fn load_config(path: &Path) -> Result<DemoConfig> {
    read_json_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariant::LlahInvariant;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let json = r#"{
            "params": { "number_of_neighbors": 6, "size_of_combination": 4, "invariant": "affine" },
            "documents": [[[0.0, 0.0], [1.0, 0.5]]],
            "queries": [{ "name": "q", "points": [[2.0, 3.0]] }],
            "output": { "result_json": "out/result.json" }
        }"#;
        let config: DemoConfig = serde_json::from_str(json).expect("parse");
        assert_eq!(config.params.number_of_neighbors, 6);
        assert_eq!(config.params.invariant, LlahInvariant::Affine);
        assert_eq!(config.params.hash_table_size, LlahParams::default().hash_table_size);
        assert_eq!(config.discretization.num_discrete, 128);
        assert_eq!(config.queries[0].min_landmarks, 8);
        let training = config.training_sets();
        assert_eq!(training.len(), 1);
        assert_eq!(training[0][1], Point2::new(1.0, 0.5));
    }
}
