#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod invariant;
pub mod io;
pub mod ops;
pub mod types;

// Building blocks – public for tools and tests, but considered internals.
pub mod combinations;
pub mod config;
pub mod feature;
pub mod hashing;
pub mod neighbors;

// --- High-level re-exports -------------------------------------------------

pub use crate::document::LlahDocument;
pub use crate::error::{LlahError, Result};
pub use crate::invariant::LlahInvariant;
pub use crate::ops::{
    DiscretizationParams, FoundDocument, LlahOperations, LlahParams, LlahWorkspace,
};
pub use crate::types::PointIndex2D;

pub use crate::diagnostics::{LookupReport, TimingBreakdown};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use llah::prelude::*;
/// use nalgebra::Point2;
///
/// # fn main() -> llah::Result<()> {
/// let landmarks: Vec<Point2<f64>> = (0..30)
///     .map(|i| Point2::new((i % 6) as f64 * 10.0 + (i as f64).sin(), (i / 6) as f64 * 10.0))
///     .collect();
///
/// let mut ops = LlahOperations::new(LlahParams::affine(6))?;
/// ops.learn_hashing([landmarks.as_slice()], &DiscretizationParams::default())?;
/// ops.create_document(&landmarks)?;
///
/// let mut workspace = ops.create_workspace();
/// let found = ops.lookup_documents(&mut workspace, &landmarks, 10)?;
/// println!("matched {} document(s)", found.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        DiscretizationParams, FoundDocument, LlahInvariant, LlahOperations, LlahParams,
        LlahWorkspace, PointIndex2D,
    };
}
