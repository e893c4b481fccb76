//! Straight-line obstruction tests against the board's blocking geometry.

mod geometry;
mod walls;

pub use geometry::{Polygon, Segment};
pub use walls::WallSet;

use crate::types::Point;

/// Movement collision query between two points.
///
/// Implementations must answer identically for `(a, b)` and `(b, a)`.
pub trait ObstructionTester: Send + Sync {
    /// Returns true if movement along the segment `a → b` collides.
    fn blocked(&self, a: Point, b: Point) -> bool;

    /// Bounded region reachable from `origin` without collision.
    fn reachable_polygon(&self, origin: Point, radius: f64, rays: usize) -> Polygon {
        Polygon::regular(origin, radius, rays)
    }
}

/// Board with nothing blocking movement.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObstruction;

impl ObstructionTester for NoObstruction {
    fn blocked(&self, _a: Point, _b: Point) -> bool {
        false
    }
}
