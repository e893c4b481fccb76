use crate::grid::GridAdapter;
use crate::types::{PieceId, Point};

use super::MovementDirection;

/// A forced relocation the user is about to pick a destination for.
///
/// Distances are game units. `distance_min <= distance_max` is a caller
/// contract and is not checked.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementRequest {
    /// Center of the piece causing the movement.
    pub source: Point,
    pub target: PieceId,
    /// Current center of the piece being moved.
    pub origin: Point,
    pub direction: MovementDirection,
    pub distance_min: f64,
    pub distance_max: f64,
}

impl MovementRequest {
    pub fn new(
        source: Point,
        target: PieceId,
        origin: Point,
        direction: MovementDirection,
        distance_min: f64,
        distance_max: f64,
    ) -> Self {
        Self {
            source,
            target,
            origin,
            direction,
            distance_min,
            distance_max,
        }
    }

    /// Grid steps that can cover `distance_max`.
    pub fn steps(&self, grid: &dyn GridAdapter) -> u32 {
        (self.distance_max / grid.distance()).ceil().max(0.0) as u32
    }

    pub fn in_range(&self, distance: f64) -> bool {
        (self.distance_min..=self.distance_max).contains(&distance)
    }
}
