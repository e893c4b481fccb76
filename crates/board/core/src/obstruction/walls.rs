use super::{ObstructionTester, Polygon, Segment};
use crate::types::Point;

/// Movement-blocking wall segments.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallSet {
    walls: Vec<Segment>,
}

impl WallSet {
    pub fn new(walls: Vec<Segment>) -> Self {
        Self { walls }
    }

    pub fn push(&mut self, wall: Segment) {
        self.walls.push(wall);
    }

    pub fn walls(&self) -> &[Segment] {
        &self.walls
    }

    /// Closest wall hit along `path`, as a parameter on `path`.
    fn first_hit(&self, path: &Segment) -> Option<f64> {
        self.walls
            .iter()
            .filter_map(|wall| path.intersection(wall))
            .min_by(f64::total_cmp)
    }
}

/// Orders endpoints so a query and its reverse test the identical segment.
fn canonical(a: Point, b: Point) -> Segment {
    if (a.x, a.y) <= (b.x, b.y) {
        Segment::new(a, b)
    } else {
        Segment::new(b, a)
    }
}

impl ObstructionTester for WallSet {
    fn blocked(&self, a: Point, b: Point) -> bool {
        let path = canonical(a, b);
        self.walls.iter().any(|wall| path.intersects(wall))
    }

    fn reachable_polygon(&self, origin: Point, radius: f64, rays: usize) -> Polygon {
        if self.walls.is_empty() {
            return Polygon::regular(origin, radius, rays);
        }
        let rays = rays.max(3);
        let points = (0..rays)
            .map(|k| {
                let angle = std::f64::consts::TAU * k as f64 / rays as f64;
                let ray = Segment::new(origin, origin + Point::new(angle.cos(), angle.sin()) * radius);
                ray.point_at(self.first_hit(&ray).unwrap_or(1.0))
            })
            .collect();
        Polygon::new(points)
    }
}
