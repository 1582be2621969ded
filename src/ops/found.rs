use crate::document::LlahDocument;
use crate::types::PointIndex2D;
use serde::Serialize;

/// A document matched by a lookup, with per-landmark votes.
///
/// Instances live in a [`LlahWorkspace`](super::LlahWorkspace) and are
/// recycled by the next lookup on that workspace.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundDocument {
    pub document_id: u32,
    /// Votes of the observed point assigned to each landmark; 0 = unseen.
    pub landmark_hits: Vec<u32>,
    /// Index of the observed point assigned to each landmark.
    pub landmark_to_dots: Vec<Option<usize>>,
}

impl FoundDocument {
    pub(crate) fn init(&mut self, document_id: u32, total_landmarks: usize) {
        self.document_id = document_id;
        self.landmark_hits.clear();
        self.landmark_hits.resize(total_landmarks, 0);
        self.landmark_to_dots.clear();
        self.landmark_to_dots.resize(total_landmarks, None);
    }

    /// Assigns `dot` to `landmark` unless a point with at least as many votes holds it.
    pub(crate) fn assign(&mut self, landmark: usize, dot: usize, votes: u32) {
        if votes > self.landmark_hits[landmark] {
            self.landmark_hits[landmark] = votes;
            self.landmark_to_dots[landmark] = Some(dot);
        }
    }

    pub fn seen_landmark(&self, which: usize) -> bool {
        self.landmark_hits.get(which).is_some_and(|&h| h > 0)
    }

    pub fn count_seen_landmarks(&self) -> usize {
        self.landmark_hits.iter().filter(|&&h| h > 0).count()
    }

    pub fn count_hits(&self) -> u64 {
        self.landmark_hits.iter().map(|&h| h as u64).sum()
    }

    /// Writes `(x, y, landmark)` for every seen landmark of `document`.
    pub fn lookup_matches(&self, document: &LlahDocument, matches: &mut Vec<PointIndex2D>) {
        debug_assert_eq!(document.document_id, self.document_id);
        matches.clear();
        for (i, p) in document.landmarks.iter().enumerate() {
            if self.seen_landmark(i) {
                matches.push(PointIndex2D::new(p.x, p.y, i));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn assignment_keeps_the_strongest_dot() {
        let mut found = FoundDocument::default();
        found.init(2, 3);
        found.assign(1, 4, 5);
        found.assign(1, 7, 5);
        assert_eq!(found.landmark_to_dots[1], Some(4));
        found.assign(1, 9, 8);
        assert_eq!(found.landmark_to_dots[1], Some(9));
        found.assign(1, 3, 2);
        assert_eq!(found.landmark_hits[1], 8);
        assert_eq!(found.count_seen_landmarks(), 1);
        assert_eq!(found.count_hits(), 8);
        assert!(!found.seen_landmark(0));
        assert!(!found.seen_landmark(42));
    }

    #[test]
    fn matches_list_only_seen_landmarks() {
        let doc = LlahDocument::new(
            0,
            &[
                Point2::new(1.0, 2.0),
                Point2::new(3.0, 4.0),
                Point2::new(5.0, 6.0),
            ],
        );
        let mut found = FoundDocument::default();
        found.init(0, 3);
        found.assign(2, 0, 1);
        found.assign(0, 1, 3);
        let mut matches = vec![PointIndex2D::new(0.0, 0.0, 99)];
        found.lookup_matches(&doc, &mut matches);
        assert_eq!(
            matches,
            vec![PointIndex2D::new(1.0, 2.0, 0), PointIndex2D::new(5.0, 6.0, 2)]
        );
    }

    #[test]
    fn init_resets_previous_state() {
        let mut found = FoundDocument::default();
        found.init(0, 4);
        found.assign(3, 1, 6);
        found.init(5, 2);
        assert_eq!(found.document_id, 5);
        assert_eq!(found.landmark_hits, vec![0, 0]);
        assert_eq!(found.landmark_to_dots, vec![None, None]);
    }
}
