//! Segment and polygon primitives used for collision tests and clipping.

use crate::types::Point;

/// Tolerance for parallel-segment detection.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Straight line segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Parameter along `self` (0 at `a`, 1 at `b`) where `other` crosses it.
    ///
    /// Parallel and collinear segments never intersect.
    pub fn intersection(&self, other: &Segment) -> Option<f64> {
        let r = self.b - self.a;
        let s = other.b - other.a;
        let denom = r.cross(s);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let offset = other.a - self.a;
        let t = offset.cross(s) / denom;
        let u = offset.cross(r) / denom;
        ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then_some(t)
    }

    pub fn intersects(&self, other: &Segment) -> bool {
        self.intersection(other).is_some()
    }

    pub fn point_at(&self, t: f64) -> Point {
        self.a + (self.b - self.a) * t
    }
}

/// Closed polygon given by its vertices in order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Regular polygon with `sides` vertices on a circle of `radius`.
    pub fn regular(center: Point, radius: f64, sides: usize) -> Self {
        let sides = sides.max(3);
        let points = (0..sides)
            .map(|k| {
                let angle = std::f64::consts::TAU * k as f64 / sides as f64;
                center + Point::new(angle.cos(), angle.sin()) * radius
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.len() < 3
    }

    /// Even-odd ray casting test.
    pub fn contains(&self, point: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        let mut inside = false;
        let mut previous = self.points[self.points.len() - 1];
        for &current in &self.points {
            if (current.y > point.y) != (previous.y > point.y) {
                let crossing =
                    (previous.x - current.x) * (point.y - current.y) / (previous.y - current.y)
                        + current.x;
                if point.x < crossing {
                    inside = !inside;
                }
            }
            previous = current;
        }
        inside
    }
}
