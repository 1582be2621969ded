//! Invariant discretization, hash folding and the chaining hash index.
//!
//! - [`Discretizer`] – density-adaptive quantization learned from a histogram.
//! - [`LlahHasher`] – ordered tuple → discretized invariants → hash code.
//! - [`LlahHashTable`] – arena-backed collision chains keyed by hash code.

pub mod discretizer;
pub mod hasher;
pub mod table;

pub use discretizer::Discretizer;
pub use hasher::LlahHasher;
pub use table::{Chain, LlahHashTable};
