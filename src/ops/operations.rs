//! Registration and retrieval pipelines.
//!
//! Typical usage:
//! ```no_run
//! use llah::{LlahOperations, LlahParams};
//! use llah::ops::DiscretizationParams;
//! use nalgebra::Point2;
//!
//! # fn example(corpus: Vec<Vec<Point2<f64>>>, observed: Vec<Point2<f64>>) -> llah::Result<()> {
//! let mut ops = LlahOperations::new(LlahParams::affine(6))?;
//! ops.learn_hashing(&corpus, &DiscretizationParams::default())?;
//! for landmarks in &corpus {
//!     ops.create_document(landmarks)?;
//! }
//! let mut workspace = ops.create_workspace();
//! for found in ops.lookup_documents(&mut workspace, &observed, 10)? {
//!     println!("doc {} seen={}", found.document_id, found.count_seen_landmarks());
//! }
//! # Ok(())
//! # }
//! ```
use super::found::FoundDocument;
use super::params::{DiscretizationParams, LlahParams};
use super::workspace::LlahWorkspace;
use crate::combinations::total_combinations;
use crate::diagnostics::{LookupReport, StageClock, VotingStats};
use crate::document::LlahDocument;
use crate::error::{LlahError, Result};
use crate::feature::LlahFeature;
use crate::hashing::{Discretizer, LlahHashTable, LlahHasher};
use crate::neighbors::{FeatureSets, NeighborEngine};
use log::{debug, warn};
use nalgebra::Point2;

/// Owns the registered documents, the hash index and the learned hashing.
///
/// Registration needs `&mut self`. Lookups take `&self` plus a caller-owned
/// [`LlahWorkspace`], so once registration is finished the instance can be
/// shared read-only between threads that each hold their own workspace.
pub struct LlahOperations {
    params: LlahParams,
    hasher: LlahHasher,
    hash_table: LlahHashTable,
    documents: Vec<LlahDocument>,
    registration: LlahWorkspace,
}

impl LlahOperations {
    pub fn new(params: LlahParams) -> Result<Self> {
        if params.number_of_neighbors < params.size_of_combination {
            return Err(LlahError::InvalidParameter(format!(
                "number_of_neighbors ({}) must be at least size_of_combination ({})",
                params.number_of_neighbors, params.size_of_combination
            )));
        }
        let hasher = LlahHasher::new(
            params.invariant,
            params.size_of_combination,
            params.hash_k,
            params.hash_table_size,
        )?;
        let registration = LlahWorkspace::new(
            params.number_of_neighbors,
            hasher.number_of_invariants(),
            params.neighbor_search,
        );
        Ok(Self {
            params,
            hasher,
            hash_table: LlahHashTable::new(),
            documents: Vec::new(),
            registration,
        })
    }

    pub fn params(&self) -> &LlahParams {
        &self.params
    }

    pub fn hasher(&self) -> &LlahHasher {
        &self.hasher
    }

    pub fn hash_table(&self) -> &LlahHashTable {
        &self.hash_table
    }

    pub fn documents(&self) -> &[LlahDocument] {
        &self.documents
    }

    pub fn document(&self, document_id: u32) -> Option<&LlahDocument> {
        self.documents.get(document_id as usize)
    }

    /// Scratch memory for [`lookup_documents`](Self::lookup_documents).
    pub fn create_workspace(&self) -> LlahWorkspace {
        LlahWorkspace::new(
            self.params.number_of_neighbors,
            self.hasher.number_of_invariants(),
            self.params.neighbor_search,
        )
    }

    /// Upper bound on distinct hash codes per point: `C(N, M) · M`.
    pub fn compute_max_unique_hash_per_point(&self) -> u64 {
        let m = self.params.size_of_combination;
        total_combinations(self.params.number_of_neighbors, m) * m as u64
    }

    /// Rejects point lists smaller than `N + 1`.
    pub fn check_list_size(&self, len: usize) -> Result<()> {
        let required = self.params.number_of_neighbors + 1;
        if len < required {
            return Err(LlahError::TooFewPoints {
                required,
                actual: len,
            });
        }
        Ok(())
    }

    /// Forgets every document and empties the hash index.
    pub fn clear_documents(&mut self) {
        debug!(
            "LlahOperations::clear_documents documents={} features={}",
            self.documents.len(),
            self.hash_table.len()
        );
        self.documents.clear();
        self.hash_table.reset();
    }

    /// Learns the invariant discretization from a representative corpus.
    ///
    /// Each point set is treated like a document: every feature tuple of
    /// every point contributes its invariants to a histogram over
    /// `[0, max_invariant_value]`, from which equal-population levels are
    /// derived. Sets with fewer than `N + 1` points are skipped.
    pub fn learn_hashing<I>(&mut self, point_sets: I, learn: &DiscretizationParams) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<[Point2<f64>]>,
    {
        self.ensure_no_documents()?;
        let length = learn.histogram_length;
        let max_value = learn.max_invariant_value;
        if length == 0 {
            return Err(LlahError::InvalidParameter(
                "histogram_length must be at least 1".into(),
            ));
        }
        if !(max_value.is_finite() && max_value > 0.0) {
            return Err(LlahError::InvalidParameter(format!(
                "max_invariant_value must be finite and positive, got {max_value}"
            )));
        }

        let mut clock = StageClock::start();
        let required = self.params.number_of_neighbors + 1;
        let size = self.params.size_of_combination;
        let Self {
            hasher,
            registration,
            ..
        } = self;

        let mut histogram = vec![0u32; length];
        let mut values = vec![0.0; hasher.number_of_invariants()];
        let mut used_sets = 0usize;
        for (set_index, set) in point_sets.into_iter().enumerate() {
            let points = set.as_ref();
            if points.len() < required {
                warn!(
                    "learn_hashing: skipping point set {} with {} points (< {})",
                    set_index,
                    points.len(),
                    required
                );
                continue;
            }
            used_sets += 1;
            compute_all_features(&mut registration.engine, points, size, |_, tuple| {
                hasher.compute_invariants(tuple, &mut values[..]);
                for &value in &values {
                    histogram[histogram_bin(value, length, max_value)] += 1;
                }
            });
        }
        if used_sets == 0 {
            return Err(LlahError::InvalidParameter(format!(
                "no training point set has at least {required} points"
            )));
        }
        clock.lap("histogram");

        hasher.learn_discretization(&histogram, max_value, learn.num_discrete)?;
        clock.lap("discretization");
        let timings = clock.finish();
        debug!(
            "LlahOperations::learn_hashing sets={} levels={} elapsed_ms={:.3}",
            used_sets,
            learn.num_discrete,
            timings.total_ms
        );
        Ok(())
    }

    /// Installs a precomputed discretization instead of learning one.
    pub fn set_discretizer(&mut self, discretizer: Discretizer) -> Result<()> {
        self.ensure_no_documents()?;
        self.hasher.set_discretizer(discretizer);
        Ok(())
    }

    /// Registers `landmarks` as a new document and indexes all of its features.
    ///
    /// Every landmark contributes `C(N, M) · M` features. Earlier documents are
    /// left untouched.
    pub fn create_document(&mut self, landmarks: &[Point2<f64>]) -> Result<&LlahDocument> {
        self.check_list_size(landmarks.len())?;
        self.ensure_learned()?;

        let document_id = self.documents.len() as u32;
        let mut document = LlahDocument::new(document_id, landmarks);
        let size = self.params.size_of_combination;
        let Self {
            hasher,
            hash_table,
            registration,
            ..
        } = self;
        let LlahWorkspace {
            engine,
            invariants,
            signature,
            ..
        } = registration;

        compute_all_features(engine, landmarks, size, |landmark_id, tuple| {
            hasher.compute_hash(tuple, &mut invariants[..], &mut *signature);
            let id = hash_table.add(LlahFeature::new(
                document_id,
                landmark_id as u32,
                signature,
            ));
            document.features.push(id);
        });
        debug!(
            "LlahOperations::create_document id={} landmarks={} features={} buckets={}",
            document_id,
            landmarks.len(),
            document.features.len(),
            self.hash_table.bucket_count()
        );

        self.documents.push(document);
        Ok(&self.documents[document_id as usize])
    }

    /// Finds registered documents matching the observed points.
    ///
    /// Returns the documents with at least `min_landmarks` distinct landmarks
    /// assigned, in the order they were first matched. An empty slice means
    /// nothing matched. The slice lives in `workspace` and is recycled by the
    /// next lookup on it.
    pub fn lookup_documents<'w>(
        &self,
        workspace: &'w mut LlahWorkspace,
        dots: &[Point2<f64>],
        min_landmarks: usize,
    ) -> Result<&'w [FoundDocument]> {
        self.lookup_documents_with_diagnostics(workspace, dots, min_landmarks)
            .map(|(found, _)| found)
    }

    /// Same as [`lookup_documents`](Self::lookup_documents) and also returns voting statistics.
    ///
    /// 1. every observed point enumerates its feature tuples and votes, in its
    ///    own booth, for each stored feature whose invariants match exactly;
    /// 2. each point resolves to its most-voted `(document, landmark)`;
    ///    a landmark claimed by several points keeps the highest vote count;
    /// 3. documents with fewer than `min_landmarks` landmarks are dropped.
    pub fn lookup_documents_with_diagnostics<'w>(
        &self,
        workspace: &'w mut LlahWorkspace,
        dots: &[Point2<f64>],
        min_landmarks: usize,
    ) -> Result<(&'w [FoundDocument], LookupReport)> {
        self.check_list_size(dots.len())?;
        self.ensure_learned()?;
        self.check_workspace(workspace)?;

        let mut clock = StageClock::start();
        workspace.reset(dots.len());
        let mut voting = VotingStats::default();
        {
            let LlahWorkspace {
                engine,
                invariants,
                signature,
                booths,
                ..
            } = &mut *workspace;
            let hasher = &self.hasher;
            let table = &self.hash_table;
            compute_all_features(
                engine,
                dots,
                self.params.size_of_combination,
                |dot, tuple| {
                    voting.feature_sets += 1;
                    hasher.compute_hash(tuple, &mut invariants[..], &mut *signature);
                    let booth = &mut booths[dot];
                    for stored in table.chain(signature.hash_code) {
                        voting.chain_entries += 1;
                        if !signature.invariants_match(&stored.invariants) {
                            voting.hash_collisions += 1;
                            continue;
                        }
                        voting.votes_cast += 1;
                        booth.vote(stored.document_id, stored.landmark_id);
                    }
                },
            );
        }
        clock.lap("features_and_votes");

        for dot in 0..dots.len() {
            let Some(winner) = workspace.booths[dot].winner() else {
                continue;
            };
            voting.voting_points += 1;
            let total = self.documents[winner.document_id as usize].landmark_count();
            workspace.found_for(winner.document_id, total).assign(
                winner.landmark_id as usize,
                dot,
                winner.votes,
            );
        }
        clock.lap("resolve");

        let candidate_documents = workspace.active;
        let mut kept = 0;
        for i in 0..workspace.active {
            if workspace.found[i].count_seen_landmarks() >= min_landmarks {
                workspace.found.swap(kept, i);
                kept += 1;
            }
        }
        workspace.active = kept;
        workspace.found_by_document.clear();
        clock.lap("aggregate_and_filter");

        let report = LookupReport {
            observed_points: dots.len(),
            min_landmarks,
            voting,
            candidate_documents,
            accepted_documents: kept,
            timings: clock.finish(),
        };
        debug!(
            "LlahOperations::lookup dots={} votes={} collisions={} candidates={} accepted={} elapsed_ms={:.3}",
            report.observed_points,
            report.voting.votes_cast,
            report.voting.hash_collisions,
            report.candidate_documents,
            report.accepted_documents,
            report.timings.total_ms
        );
        Ok((workspace.results(), report))
    }

    /// Single best-match lookup. No selection rule has been settled on, so
    /// this always fails rather than guessing.
    pub fn lookup_best_document<'w>(
        &self,
        _workspace: &'w mut LlahWorkspace,
        _dots: &[Point2<f64>],
    ) -> Result<&'w FoundDocument> {
        Err(LlahError::NotImplemented("lookup_best_document"))
    }

    fn ensure_learned(&self) -> Result<()> {
        if self.hasher.discretizer().is_learned() {
            Ok(())
        } else {
            Err(LlahError::HashingNotLearned)
        }
    }

    fn ensure_no_documents(&self) -> Result<()> {
        if self.documents.is_empty() {
            Ok(())
        } else {
            Err(LlahError::DocumentsRegistered(self.documents.len()))
        }
    }

    fn check_workspace(&self, workspace: &LlahWorkspace) -> Result<()> {
        if workspace.engine.number_of_neighbors() != self.params.number_of_neighbors
            || workspace.invariants.len() != self.hasher.number_of_invariants()
        {
            return Err(LlahError::InvalidParameter(
                "workspace was created for a different configuration".into(),
            ));
        }
        Ok(())
    }
}

/// Runs `process(point_index, tuple)` for every feature tuple of every point.
fn compute_all_features<F>(
    engine: &mut NeighborEngine,
    points: &[Point2<f64>],
    size: usize,
    mut process: F,
) where
    F: FnMut(usize, &[Point2<f64>]),
{
    engine.set_points(points);
    for point_id in 0..points.len() {
        let neighbors = engine.find_neighbors(points, point_id);
        for tuple in FeatureSets::new(neighbors, size) {
            process(point_id, &tuple);
        }
    }
}

/// Histogram bin of `value` over `[0, max_value]`; non-finite values go to the last bin.
fn histogram_bin(value: f64, length: usize, max_value: f64) -> usize {
    if !value.is_finite() {
        return length - 1;
    }
    // negative values saturate to bin 0
    ((length as f64 * value / max_value) as usize).min(length - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariant::LlahInvariant;
    use crate::neighbors::NeighborSearchKind;

    /// Jittered grid; the jitter keeps neighbor distances and triangles non-degenerate.
    fn grid(cols: usize, rows: usize, spacing: f64, origin: (f64, f64)) -> Vec<Point2<f64>> {
        let mut points = Vec::with_capacity(cols * rows);
        for r in 0..rows {
            for c in 0..cols {
                let k = (r * cols + c) as f64;
                let jx = (k * 12.9898).sin() * 0.23 * spacing;
                let jy = (k * 78.233).cos() * 0.23 * spacing;
                points.push(Point2::new(
                    origin.0 + c as f64 * spacing + jx,
                    origin.1 + r as f64 * spacing + jy,
                ));
            }
        }
        points
    }

    fn learned_ops(params: LlahParams, corpus: &[Vec<Point2<f64>>]) -> LlahOperations {
        let mut ops = LlahOperations::new(params).expect("valid params");
        let learn = DiscretizationParams {
            num_discrete: 100,
            histogram_length: 1000,
            max_invariant_value: 25.0,
        };
        ops.learn_hashing(corpus, &learn).expect("learn");
        ops
    }

    #[test]
    fn round_trip_hits_every_landmark() {
        let doc = grid(5, 4, 10.0, (0.0, 0.0));
        let mut ops = learned_ops(LlahParams::affine(6), &[doc.clone()]);
        ops.create_document(&doc).expect("register");
        assert_eq!(
            ops.hash_table().len() as u64,
            doc.len() as u64 * ops.compute_max_unique_hash_per_point()
        );

        let mut ws = ops.create_workspace();
        let found = ops.lookup_documents(&mut ws, &doc, 10).expect("lookup");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].document_id, 0);
        assert_eq!(found[0].count_seen_landmarks(), doc.len());
        for (landmark, dot) in found[0].landmark_to_dots.iter().enumerate() {
            assert_eq!(*dot, Some(landmark));
        }
    }

    #[test]
    fn single_bucket_table_still_separates_features() {
        let doc = grid(5, 4, 10.0, (0.0, 0.0));
        let params = LlahParams {
            hash_table_size: 1,
            ..LlahParams::affine(6)
        };
        let mut ops = learned_ops(params, &[doc.clone()]);
        ops.create_document(&doc).expect("register");
        assert_eq!(ops.hash_table().bucket_count(), 1);

        let mut ws = ops.create_workspace();
        let (found, report) = ops
            .lookup_documents_with_diagnostics(&mut ws, &doc, 1)
            .expect("lookup");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].count_seen_landmarks(), doc.len());
        assert!(report.voting.hash_collisions > 0);
        assert!(report.collision_ratio() > 0.0 && report.collision_ratio() < 1.0);
        assert_eq!(
            report.voting.chain_entries,
            report.voting.hash_collisions + report.voting.votes_cast
        );
    }

    #[test]
    fn requires_learning_before_registration() {
        let mut ops = LlahOperations::new(LlahParams::affine(6)).expect("valid params");
        let doc = grid(4, 3, 5.0, (0.0, 0.0));
        assert!(matches!(
            ops.create_document(&doc),
            Err(LlahError::HashingNotLearned)
        ));
    }

    #[test]
    fn too_few_points_are_rejected() {
        let doc = grid(4, 3, 5.0, (0.0, 0.0));
        let mut ops = learned_ops(LlahParams::affine(6), &[doc.clone()]);
        assert!(matches!(
            ops.create_document(&doc[..6]),
            Err(LlahError::TooFewPoints {
                required: 7,
                actual: 6
            })
        ));
        ops.create_document(&doc).expect("register");
        let mut ws = ops.create_workspace();
        assert!(matches!(
            ops.lookup_documents(&mut ws, &doc[..3], 1),
            Err(LlahError::TooFewPoints { .. })
        ));
    }

    #[test]
    fn relearning_requires_clearing_documents() {
        let doc = grid(4, 3, 5.0, (0.0, 0.0));
        let mut ops = learned_ops(LlahParams::affine(6), &[doc.clone()]);
        ops.create_document(&doc).expect("register");
        let learn = DiscretizationParams::default();
        assert!(matches!(
            ops.learn_hashing([doc.as_slice()], &learn),
            Err(LlahError::DocumentsRegistered(1))
        ));
        ops.clear_documents();
        assert!(ops.documents().is_empty());
        assert!(ops.hash_table().is_empty());
        ops.learn_hashing([doc.as_slice()], &learn).expect("relearn");
        let again = ops.create_document(&doc).expect("register");
        assert_eq!(again.document_id, 0);
    }

    #[test]
    fn learning_skips_small_sets_and_fails_without_any() {
        let mut ops = LlahOperations::new(LlahParams::affine(6)).expect("valid params");
        let small = grid(2, 2, 5.0, (0.0, 0.0));
        let learn = DiscretizationParams::default();
        assert!(matches!(
            ops.learn_hashing([small.as_slice()], &learn),
            Err(LlahError::InvalidParameter(_))
        ));
        let big = grid(4, 3, 5.0, (0.0, 0.0));
        ops.learn_hashing([small.as_slice(), big.as_slice()], &learn)
            .expect("learn");
        assert!(ops.hasher().discretizer().is_learned());
    }

    #[test]
    fn best_document_lookup_is_not_implemented() {
        let doc = grid(4, 3, 5.0, (0.0, 0.0));
        let ops = learned_ops(LlahParams::affine(6), &[doc.clone()]);
        let mut ws = ops.create_workspace();
        assert!(matches!(
            ops.lookup_best_document(&mut ws, &doc),
            Err(LlahError::NotImplemented(_))
        ));
    }

    #[test]
    fn foreign_workspace_is_rejected() {
        let doc = grid(4, 3, 5.0, (0.0, 0.0));
        let ops = learned_ops(LlahParams::affine(6), &[doc.clone()]);
        let mut ws = LlahWorkspace::new(5, 1, NeighborSearchKind::KdTree);
        assert!(matches!(
            ops.lookup_documents(&mut ws, &doc, 1),
            Err(LlahError::InvalidParameter(_))
        ));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = LlahParams {
            number_of_neighbors: 3,
            ..LlahParams::affine(3)
        };
        assert!(LlahOperations::new(params).is_err());
        let params = LlahParams {
            size_of_combination: 4,
            invariant: LlahInvariant::CrossRatio,
            ..LlahParams::default()
        };
        assert!(LlahOperations::new(params).is_err());
    }

    #[test]
    fn histogram_bins_clamp() {
        assert_eq!(histogram_bin(-1.0, 10, 5.0), 0);
        assert_eq!(histogram_bin(2.5, 10, 5.0), 5);
        assert_eq!(histogram_bin(99.0, 10, 5.0), 9);
        assert_eq!(histogram_bin(f64::NAN, 10, 5.0), 9);
        assert_eq!(histogram_bin(f64::INFINITY, 10, 5.0), 9);
    }

    #[test]
    fn max_unique_hash_per_point() {
        let ops = LlahOperations::new(LlahParams::affine(6)).expect("valid params");
        assert_eq!(ops.compute_max_unique_hash_per_point(), 15 * 4);
        let ops = LlahOperations::new(LlahParams::default()).expect("valid params");
        assert_eq!(ops.compute_max_unique_hash_per_point(), 21 * 5);
    }
}
