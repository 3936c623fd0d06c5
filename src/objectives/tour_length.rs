use super::Objective;
use crate::distance::DistanceMatrix;
use crate::tour::PinnedTour;

/// 以闭合环路的总长度（公里）为目标值
pub struct TourLength<'a> {
    matrix: &'a DistanceMatrix,
}

impl<'a> TourLength<'a> {
    pub fn new(matrix: &'a DistanceMatrix) -> Self {
        Self { matrix }
    }
}

impl Objective for TourLength<'_> {
    type Decision = PinnedTour;

    fn evaluate(&self, decision: &PinnedTour) -> f64 {
        decision.length(self.matrix)
    }
}
