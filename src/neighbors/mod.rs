//! Local neighborhoods and the feature tuples enumerated from them.
//!
//! Overview
//! - [`search`] – k-NN services behind the [`NearestNeighborSearch`] trait
//!   (k-d tree by default, exhaustive search for small or degenerate sets).
//! - [`engine`] – [`NeighborEngine`] picks the N nearest neighbors of a point
//!   and sorts them by polar angle; [`FeatureSets`] walks every M-subset of
//!   them together with its M cyclic rotations.
//!
//! Key Ideas
//! - Angular order is only defined up to a cyclic shift (which neighbor comes
//!   first depends on the viewing rotation). Enumerating every rotation of
//!   every subset guarantees that the registration-time ordering is visited
//!   at query time as well.
//! - Subsets are enumerated in lexicographic index order so registration and
//!   retrieval agree on the sequence.

pub mod engine;
pub mod search;

pub use engine::{enumerate_feature_sets, FeatureSets, FeatureTuple, NeighborEngine};
pub use search::{ExhaustiveSearch, KdTreeSearch, NearestNeighborSearch, NeighborSearchKind};
