use crate::feature::FeatureId;
use nalgebra::Point2;

/// A registered landmark set and the features generated from it.
///
/// `document_id` is the registration index; it is never reused until every
/// document is cleared.
#[derive(Clone, Debug, Default)]
pub struct LlahDocument {
    pub document_id: u32,
    pub landmarks: Vec<Point2<f64>>,
    pub features: Vec<FeatureId>,
}

impl LlahDocument {
    /// Copies `landmarks`; the caller's slice is not retained.
    pub fn new(document_id: u32, landmarks: &[Point2<f64>]) -> Self {
        Self {
            document_id,
            landmarks: landmarks.to_vec(),
            features: Vec::new(),
        }
    }

    pub fn landmark_count(&self) -> usize {
        self.landmarks.len()
    }
}
