use serde::Serialize;

/// Location of a seen landmark together with its index inside the owning document.
///
/// This is the hand-off record for downstream pose estimation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PointIndex2D {
    pub x: f64,
    pub y: f64,
    pub index: usize,
}

impl PointIndex2D {
    pub fn new(x: f64, y: f64, index: usize) -> Self {
        Self { x, y, index }
    }
}
