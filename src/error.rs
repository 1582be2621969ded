//! Error type shared by registration, retrieval and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the LLAH pipeline.
///
/// Retrieval that matches nothing is not an error: it returns an empty slice.
#[derive(Error, Debug)]
pub enum LlahError {
    /// Fewer points than `N + 1` were supplied to registration or retrieval.
    #[error("at least {required} points are required, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("hashing has not been learned; call learn_hashing or set_discretizer first")]
    HashingNotLearned,

    /// Relearning would invalidate the features already stored in the hash table.
    #[error("cannot change the discretization while {0} documents are registered")]
    DocumentsRegistered(usize),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LlahError>;
