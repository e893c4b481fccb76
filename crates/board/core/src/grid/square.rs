use arrayvec::ArrayVec;

use super::{CellPolygon, DistanceMeasurer, GridAdapter, expect_offset};
use crate::error::MovementError;
use crate::types::{CellAddress, GridTopology, Point};

/// How diagonal steps are priced on a square grid.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DiagonalRule {
    /// Every diagonal costs one step (1-1-1).
    #[default]
    Equidistant,
    /// Diagonals alternate between one and two steps (1-2-1).
    Alternating,
    /// Diagonals cost two steps.
    Manhattan,
    /// Euclidean length over cell counts.
    Exact,
}

impl DiagonalRule {
    /// Path length in cells for a displacement of `di` rows and `dj` columns.
    pub fn steps(self, di: u32, dj: u32) -> f64 {
        let diagonal = di.min(dj);
        let straight = di.max(dj) - diagonal;
        match self {
            DiagonalRule::Equidistant => f64::from(diagonal + straight),
            DiagonalRule::Alternating => f64::from(straight + diagonal + diagonal / 2),
            DiagonalRule::Manhattan => f64::from(di + dj),
            DiagonalRule::Exact => f64::from(di).hypot(f64::from(dj)),
        }
    }
}

/// Square grid addressed by `{ i: row, j: column }` offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquareGrid {
    size: f64,
    distance: f64,
    diagonals: DiagonalRule,
}

impl SquareGrid {
    pub fn new(size: f64, distance: f64, diagonals: DiagonalRule) -> Self {
        Self {
            size,
            distance,
            diagonals,
        }
    }

    pub fn diagonals(&self) -> DiagonalRule {
        self.diagonals
    }

    fn offset_of(&self, point: Point) -> (i32, i32) {
        (
            (point.y / self.size).floor() as i32,
            (point.x / self.size).floor() as i32,
        )
    }
}

impl DistanceMeasurer for SquareGrid {
    fn measure(&self, a: Point, b: Point) -> f64 {
        let (ai, aj) = self.offset_of(a);
        let (bi, bj) = self.offset_of(b);
        self.diagonals.steps(ai.abs_diff(bi), aj.abs_diff(bj)) * self.distance
    }
}

impl GridAdapter for SquareGrid {
    fn topology(&self) -> GridTopology {
        GridTopology::Square
    }

    fn size(&self) -> f64 {
        self.size
    }

    fn distance(&self) -> f64 {
        self.distance
    }

    fn to_cell_address(&self, point: Point) -> Option<CellAddress> {
        let (i, j) = self.offset_of(point);
        Some(CellAddress::offset(i, j))
    }

    fn cell_center(&self, address: CellAddress) -> Result<Point, MovementError> {
        let half = self.size / 2.0;
        self.cell_top_left(address)
            .map(|corner| corner + Point::new(half, half))
    }

    fn cell_top_left(&self, address: CellAddress) -> Result<Point, MovementError> {
        let (i, j) = expect_offset(GridTopology::Square, address)?;
        Ok(Point::new(f64::from(j) * self.size, f64::from(i) * self.size))
    }

    fn cell_polygon(&self, address: CellAddress) -> Result<CellPolygon, MovementError> {
        let corner = self.cell_top_left(address)?;
        let mut polygon = ArrayVec::new();
        polygon.push(corner);
        polygon.push(corner + Point::new(self.size, 0.0));
        polygon.push(corner + Point::new(self.size, self.size));
        polygon.push(corner + Point::new(0.0, self.size));
        Ok(polygon)
    }

    /// Scans the whole `(2·steps+1)²` box; callers filter by measured distance.
    fn neighbors_within_steps(&self, address: CellAddress, steps: u32) -> Vec<CellAddress> {
        let CellAddress::Offset { i, j } = address else {
            return Vec::new();
        };
        let steps = steps as i32;
        let mut cells = Vec::with_capacity(((2 * steps + 1) * (2 * steps + 1)) as usize);
        for di in -steps..=steps {
            for dj in -steps..=steps {
                if di == 0 && dj == 0 {
                    continue;
                }
                cells.push(CellAddress::offset(i + di, j + dj));
            }
        }
        cells
    }
}
