use arrayvec::ArrayVec;

use super::{CellPolygon, DistanceMeasurer, GridAdapter};
use crate::error::MovementError;
use crate::types::{CellAddress, GridTopology, Point};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Which way the hexagons point.
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
pub enum HexOrientation {
    /// Vertices at top and bottom; cells form rows.
    #[default]
    PointyTop,
    /// Vertices at left and right; cells form columns.
    FlatTop,
}

/// Hexagonal grid addressed by cube coordinates.
///
/// `size` is the spacing between the centers of adjacent cells. Cell
/// `[0, 0, 0]` has its bounding box anchored at the pixel origin.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexGrid {
    size: f64,
    distance: f64,
    orientation: HexOrientation,
}

impl HexGrid {
    pub fn new(size: f64, distance: f64, orientation: HexOrientation) -> Self {
        Self {
            size,
            distance,
            orientation,
        }
    }

    pub fn orientation(&self) -> HexOrientation {
        self.orientation
    }

    /// Width and height of one cell's bounding box.
    fn cell_extent(&self) -> (f64, f64) {
        let long = 2.0 * self.size / SQRT_3;
        match self.orientation {
            HexOrientation::PointyTop => (self.size, long),
            HexOrientation::FlatTop => (long, self.size),
        }
    }

    fn cube_of(&self, point: Point) -> (i32, i32, i32) {
        let (width, height) = self.cell_extent();
        let x = point.x - width / 2.0;
        let y = point.y - height / 2.0;
        let (q, r) = match self.orientation {
            HexOrientation::PointyTop => {
                let r = y / (self.size * SQRT_3 / 2.0);
                (x / self.size - r / 2.0, r)
            }
            HexOrientation::FlatTop => {
                let q = x / (self.size * SQRT_3 / 2.0);
                (q, y / self.size - q / 2.0)
            }
        };
        cube_round(q, r)
    }

    fn center_of(&self, q: i32, r: i32) -> Point {
        let (width, height) = self.cell_extent();
        let (q, r) = (f64::from(q), f64::from(r));
        let (x, y) = match self.orientation {
            HexOrientation::PointyTop => (self.size * (q + r / 2.0), self.size * SQRT_3 / 2.0 * r),
            HexOrientation::FlatTop => (self.size * SQRT_3 / 2.0 * q, self.size * (r + q / 2.0)),
        };
        Point::new(x + width / 2.0, y + height / 2.0)
    }

    fn expect_cube(&self, address: CellAddress) -> Result<(i32, i32), MovementError> {
        match address {
            CellAddress::Cube { q, r, .. } => Ok((q, r)),
            CellAddress::Offset { .. } => Err(MovementError::UnsupportedAddress {
                topology: GridTopology::Hexagonal,
                address,
            }),
        }
    }
}

/// Number of steps between two cube coordinates.
pub fn hex_steps(a: (i32, i32, i32), b: (i32, i32, i32)) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1) + a.2.abs_diff(b.2)) / 2
}

/// Rounds fractional axial coordinates to the containing cube cell.
fn cube_round(q: f64, r: f64) -> (i32, i32, i32) {
    let s = -q - r;
    let (mut rq, mut rr, rs) = (q.round(), r.round(), s.round());
    let (dq, dr, ds) = ((rq - q).abs(), (rr - r).abs(), (rs - s).abs());
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    let (q, r) = (rq as i32, rr as i32);
    (q, r, -q - r)
}

impl DistanceMeasurer for HexGrid {
    fn measure(&self, a: Point, b: Point) -> f64 {
        f64::from(hex_steps(self.cube_of(a), self.cube_of(b))) * self.distance
    }
}

impl GridAdapter for HexGrid {
    fn topology(&self) -> GridTopology {
        GridTopology::Hexagonal
    }

    fn size(&self) -> f64 {
        self.size
    }

    fn distance(&self) -> f64 {
        self.distance
    }

    fn to_cell_address(&self, point: Point) -> Option<CellAddress> {
        let (q, r, s) = self.cube_of(point);
        Some(CellAddress::Cube { q, r, s })
    }

    fn cell_center(&self, address: CellAddress) -> Result<Point, MovementError> {
        let (q, r) = self.expect_cube(address)?;
        Ok(self.center_of(q, r))
    }

    fn cell_top_left(&self, address: CellAddress) -> Result<Point, MovementError> {
        let (width, height) = self.cell_extent();
        self.cell_center(address)
            .map(|center| center - Point::new(width / 2.0, height / 2.0))
    }

    fn cell_polygon(&self, address: CellAddress) -> Result<CellPolygon, MovementError> {
        let center = self.cell_center(address)?;
        let radius = self.size / SQRT_3;
        let start = match self.orientation {
            HexOrientation::PointyTop => -30.0_f64,
            HexOrientation::FlatTop => 0.0,
        };
        let mut polygon = ArrayVec::new();
        for corner in 0..6 {
            let angle = (start + 60.0 * f64::from(corner)).to_radians();
            polygon.push(center + Point::new(angle.cos(), angle.sin()) * radius);
        }
        Ok(polygon)
    }

    fn neighbors_within_steps(&self, address: CellAddress, steps: u32) -> Vec<CellAddress> {
        let CellAddress::Cube { q, r, .. } = address else {
            return Vec::new();
        };
        let steps = steps as i32;
        let mut cells = Vec::with_capacity((3 * steps * (steps + 1)) as usize);
        for dq in -steps..=steps {
            let r_min = (-steps).max(-dq - steps);
            let r_max = steps.min(-dq + steps);
            for dr in r_min..=r_max {
                if dq == 0 && dr == 0 {
                    continue;
                }
                cells.push(CellAddress::cube(q + dq, r + dr));
            }
        }
        cells
    }
}
