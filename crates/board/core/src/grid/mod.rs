//! Topology-specific coordinate math.
//!
//! Every adapter answers the same questions (which cell holds a point, where
//! a cell sits, which cells surround it, how far apart two points are) so the
//! destination search never branches on topology except through
//! [`GridAdapter::is_continuous`].

mod gridless;
mod hex;
mod square;

pub use gridless::GridlessGrid;
pub use hex::{HexGrid, HexOrientation};
pub use square::{DiagonalRule, SquareGrid};

use arrayvec::ArrayVec;

use crate::error::MovementError;
use crate::types::{CellAddress, GridTopology, Point};

/// Outline of one cell: four corners on square boards, six on hexagonal ones.
pub type CellPolygon = ArrayVec<Point, 6>;

/// Grid-aware path distance between two points, in game units.
///
/// All range and direction comparisons go through this measurement, never
/// through raw pixel distance.
pub trait DistanceMeasurer: Send + Sync {
    fn measure(&self, a: Point, b: Point) -> f64;
}

/// Coordinate conversions and neighbor enumeration for one board topology.
pub trait GridAdapter: DistanceMeasurer {
    fn topology(&self) -> GridTopology;

    /// Pixel size of one grid unit.
    fn size(&self) -> f64;

    /// Game units represented by one grid unit.
    fn distance(&self) -> f64;

    /// Cell containing `point`, or `None` on continuous boards.
    fn to_cell_address(&self, point: Point) -> Option<CellAddress>;

    fn cell_center(&self, address: CellAddress) -> Result<Point, MovementError>;

    fn cell_top_left(&self, address: CellAddress) -> Result<Point, MovementError>;

    fn cell_polygon(&self, address: CellAddress) -> Result<CellPolygon, MovementError>;

    /// Cells within `steps` of `address`, excluding `address` itself.
    fn neighbors_within_steps(&self, address: CellAddress, steps: u32) -> Vec<CellAddress>;

    fn is_continuous(&self) -> bool {
        self.topology() == GridTopology::Continuous
    }

    fn pixels_per_unit(&self) -> f64 {
        self.size() / self.distance()
    }
}

/// Grid adapter selected by topology at construction.
#[derive(Clone, Debug, PartialEq)]
pub enum Grid {
    Square(SquareGrid),
    Hex(HexGrid),
    Gridless(GridlessGrid),
}

impl Grid {
    /// Builds the default adapter for `topology`.
    ///
    /// Square boards count diagonals as one step, hexagonal boards use
    /// pointy-top rows.
    pub fn for_topology(topology: GridTopology, size: f64, distance: f64) -> Self {
        match topology {
            GridTopology::Square => {
                Grid::Square(SquareGrid::new(size, distance, DiagonalRule::default()))
            }
            GridTopology::Hexagonal => {
                Grid::Hex(HexGrid::new(size, distance, HexOrientation::default()))
            }
            GridTopology::Continuous => Grid::Gridless(GridlessGrid::new(size, distance)),
        }
    }

    fn adapter(&self) -> &dyn GridAdapter {
        match self {
            Grid::Square(grid) => grid,
            Grid::Hex(grid) => grid,
            Grid::Gridless(grid) => grid,
        }
    }
}

impl DistanceMeasurer for Grid {
    fn measure(&self, a: Point, b: Point) -> f64 {
        self.adapter().measure(a, b)
    }
}

impl GridAdapter for Grid {
    fn topology(&self) -> GridTopology {
        self.adapter().topology()
    }

    fn size(&self) -> f64 {
        self.adapter().size()
    }

    fn distance(&self) -> f64 {
        self.adapter().distance()
    }

    fn to_cell_address(&self, point: Point) -> Option<CellAddress> {
        self.adapter().to_cell_address(point)
    }

    fn cell_center(&self, address: CellAddress) -> Result<Point, MovementError> {
        self.adapter().cell_center(address)
    }

    fn cell_top_left(&self, address: CellAddress) -> Result<Point, MovementError> {
        self.adapter().cell_top_left(address)
    }

    fn cell_polygon(&self, address: CellAddress) -> Result<CellPolygon, MovementError> {
        self.adapter().cell_polygon(address)
    }

    fn neighbors_within_steps(&self, address: CellAddress, steps: u32) -> Vec<CellAddress> {
        self.adapter().neighbors_within_steps(address, steps)
    }
}

/// Offset part of `address`, rejecting cube addresses.
pub(crate) fn expect_offset(
    topology: GridTopology,
    address: CellAddress,
) -> Result<(i32, i32), MovementError> {
    match address {
        CellAddress::Offset { i, j } => Ok((i, j)),
        CellAddress::Cube { .. } => Err(MovementError::UnsupportedAddress { topology, address }),
    }
}
