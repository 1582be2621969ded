//! LLAH orchestrator: hash learning, document registration and retrieval.
//!
//! Overview
//! - For every point, the N nearest neighbors are ordered clockwise by angle
//!   around it. Every M-subset of that ring, taken under each of its M cyclic
//!   starting points, is one feature tuple.
//! - A tuple's invariants are quantized with a learned discretizer and folded
//!   into a hash code. Registration stores one record per tuple, tagged with
//!   the owning document and landmark.
//! - Retrieval recomputes the tuples of the observed points. Every stored
//!   record with identical quantized invariants votes for its
//!   `(document, landmark)` in the observed point's booth; each point then
//!   maps to its booth winner and documents with enough distinct landmarks are
//!   reported.
//!
//! Modules
//! - [`params`] – structural and learning parameters.
//! - `operations` – the [`LlahOperations`] implementation.
//! - `workspace` – per-caller booths and pooled results.
//! - `found` – the [`FoundDocument`] result type.
//!
//! Key Ideas
//! - The clockwise ordering is only defined up to rotation, so every rotation
//!   of a subset is stored; any one of them matches at lookup time.
//! - Hash codes only select a chain. Votes require an exact match of all
//!   quantized invariants, so a small hash table costs speed, not accuracy.

mod found;
mod operations;
pub mod params;
mod workspace;

pub use found::FoundDocument;
pub use operations::LlahOperations;
pub use params::{DiscretizationParams, LlahParams};
pub use workspace::{BoothEntry, LlahWorkspace, VotingBooth};
