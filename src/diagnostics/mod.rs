//! Diagnostics returned next to lookup results.
//!
//! `LookupReport` is filled by every lookup; the plain
//! [`lookup_documents`](crate::ops::LlahOperations::lookup_documents) entry
//! point simply drops it.

pub mod lookup;
pub mod timing;

pub(crate) use timing::StageClock;

pub use lookup::{LookupReport, VotingStats};
pub use timing::{StageTiming, TimingBreakdown};
