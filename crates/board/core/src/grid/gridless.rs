use super::{CellPolygon, DistanceMeasurer, GridAdapter, SquareGrid, expect_offset};
use crate::error::MovementError;
use crate::types::{CellAddress, GridTopology, Point};

/// Continuous board with no discrete cells.
///
/// Distances are Euclidean pixel lengths scaled to game units. Offset
/// addresses are still accepted for drawing (unit tiles of `size` pixels),
/// but points never snap to them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridlessGrid {
    size: f64,
    distance: f64,
}

impl GridlessGrid {
    pub fn new(size: f64, distance: f64) -> Self {
        Self { size, distance }
    }

    fn tiles(&self) -> SquareGrid {
        SquareGrid::new(self.size, self.distance, Default::default())
    }
}

impl DistanceMeasurer for GridlessGrid {
    fn measure(&self, a: Point, b: Point) -> f64 {
        a.distance_to(b) / self.pixels_per_unit()
    }
}

impl GridAdapter for GridlessGrid {
    fn topology(&self) -> GridTopology {
        GridTopology::Continuous
    }

    fn size(&self) -> f64 {
        self.size
    }

    fn distance(&self) -> f64 {
        self.distance
    }

    fn to_cell_address(&self, _point: Point) -> Option<CellAddress> {
        None
    }

    fn cell_center(&self, address: CellAddress) -> Result<Point, MovementError> {
        expect_offset(GridTopology::Continuous, address)?;
        self.tiles().cell_center(address)
    }

    fn cell_top_left(&self, address: CellAddress) -> Result<Point, MovementError> {
        expect_offset(GridTopology::Continuous, address)?;
        self.tiles().cell_top_left(address)
    }

    fn cell_polygon(&self, address: CellAddress) -> Result<CellPolygon, MovementError> {
        expect_offset(GridTopology::Continuous, address)?;
        self.tiles().cell_polygon(address)
    }

    fn neighbors_within_steps(&self, _address: CellAddress, _steps: u32) -> Vec<CellAddress> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_scales_pixels_to_units() {
        let grid = GridlessGrid::new(100.0, 5.0);
        assert_eq!(grid.measure(Point::ORIGIN, Point::new(300.0, 400.0)), 25.0);
        assert_eq!(grid.measure(Point::new(10.0, 10.0), Point::new(30.0, 10.0)), 1.0);
    }

    #[test]
    fn has_no_discrete_cells() {
        let grid = GridlessGrid::new(100.0, 5.0);
        assert!(grid.is_continuous());
        assert_eq!(grid.to_cell_address(Point::new(50.0, 50.0)), None);
        assert!(
            grid.neighbors_within_steps(CellAddress::offset(0, 0), 3)
                .is_empty()
        );
        assert!(grid.cell_center(CellAddress::cube(0, 0)).is_err());
    }
}
