use crate::grid::GridAdapter;
use crate::obstruction::ObstructionTester;
use crate::types::{CellAddress, Point};

use super::{ContinuousRegion, RegionShape, ValidDestinations, ValidPositionSet};

/// Displacements at or below this many game units count as staying put.
const MIN_DISPLACEMENT: f64 = 1e-6;
/// One-ulp nudges tried when rounding leaves a built point just out of range.
const MAX_SETTLE_STEPS: usize = 16;

/// A click accepted as the destination.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// Where the target's center lands.
    pub center: Point,
    /// Destination cell, on discrete boards.
    pub address: Option<CellAddress>,
    /// Cell corner the piece snaps to, on discrete boards.
    pub top_left: Option<Point>,
}

/// Maps pointer clicks onto accepted destinations.
pub struct PointerResolver<'a> {
    grid: &'a dyn GridAdapter,
    obstruction: &'a dyn ObstructionTester,
}

impl<'a> PointerResolver<'a> {
    pub fn new(grid: &'a dyn GridAdapter, obstruction: &'a dyn ObstructionTester) -> Self {
        Self { grid, obstruction }
    }

    /// Resolves `click` against the destinations, or `None` if it misses.
    ///
    /// Discrete boards require the click's cell to be in the set exactly.
    /// Continuous boards accept clicks within the tolerance margin of the
    /// region and clamp them onto it.
    pub fn resolve(&self, destinations: &ValidDestinations, click: Point) -> Option<Resolution> {
        match destinations {
            ValidDestinations::Discrete(set) => self.resolve_cell(set, click),
            ValidDestinations::Continuous(region) => match region.shape {
                RegionShape::Annulus => self.resolve_annulus(region, click),
                RegionShape::Bands(_) => self.resolve_bands(region, click),
            },
        }
    }

    /// Re-checks a resolution for obstruction just before it is committed.
    pub fn still_clear(&self, origin: Point, resolution: &Resolution) -> bool {
        !self.obstruction.blocked(origin, resolution.center)
    }

    fn resolve_cell(&self, set: &ValidPositionSet, click: Point) -> Option<Resolution> {
        let address = self.grid.to_cell_address(click)?;
        set.get(address).map(|position| Resolution {
            center: position.center,
            address: Some(position.address),
            top_left: Some(position.top_left),
        })
    }

    fn resolve_annulus(&self, region: &ContinuousRegion, click: Point) -> Option<Resolution> {
        let request = &region.request;
        let origin = request.origin;
        let (min, max) = (request.distance_min, request.distance_max);

        let distance = self.grid.measure(origin, click);
        if distance < min - region.tolerance || distance > max + region.tolerance {
            return None;
        }

        let clamped = distance.clamp(min, max);
        if clamped <= MIN_DISPLACEMENT {
            return None;
        }
        let point = if clamped == distance {
            click
        } else {
            self.settle(region, (click - origin).normalized()?, clamped)?
        };

        self.accept(region, point)
    }

    fn resolve_bands(&self, region: &ContinuousRegion, click: Point) -> Option<Resolution> {
        let request = &region.request;
        let offset = click - request.origin;

        region.bands().iter().find_map(|band| {
            let along = offset.dot(band.axis) / region.pixels_per_unit;
            let across = offset.cross(band.axis).abs() / region.pixels_per_unit;
            if across > region.tolerance
                || along < 0.0
                || along < band.min - region.tolerance
                || along > band.max + region.tolerance
            {
                return None;
            }

            let clamped = along.clamp(band.min, band.max);
            if clamped <= MIN_DISPLACEMENT {
                return None;
            }
            let point = self.settle(region, band.axis, clamped)?;
            if !band.heading.accepts(self.grid, request, point) {
                return None;
            }
            self.accept(region, point)
        })
    }

    /// Builds the point `distance` units along `axis`, nudging `distance`
    /// by single ulps until the measured distance lands inside the range.
    fn settle(&self, region: &ContinuousRegion, axis: Point, distance: f64) -> Option<Point> {
        let request = &region.request;
        let mut distance = distance;
        for _ in 0..MAX_SETTLE_STEPS {
            let point = region.point_along(axis, distance);
            let measured = self.grid.measure(request.origin, point);
            if request.in_range(measured) {
                return Some(point);
            }
            // `distance` is positive here, so stepping the bits moves one ulp.
            distance = if measured > request.distance_max {
                f64::from_bits(distance.to_bits() - 1)
            } else {
                f64::from_bits(distance.to_bits() + 1)
            };
        }
        None
    }

    fn accept(&self, region: &ContinuousRegion, point: Point) -> Option<Resolution> {
        if self.obstruction.blocked(region.request.origin, point) {
            return None;
        }
        Some(Resolution {
            center: point,
            address: None,
            top_left: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::grid::{DiagonalRule, DistanceMeasurer, Grid, GridlessGrid, SquareGrid};
    use crate::movement::{MovementDirection, MovementRequest};
    use crate::obstruction::{NoObstruction, Segment, WallSet};
    use crate::types::{GridTopology, PieceId};

    const EPS: f64 = 1e-9;

    fn gridless() -> GridlessGrid {
        GridlessGrid::new(100.0, 5.0)
    }

    fn continuous(
        grid: &GridlessGrid,
        obstruction: &dyn ObstructionTester,
        direction: MovementDirection,
        min: f64,
        max: f64,
    ) -> ValidDestinations {
        let request = MovementRequest::new(
            Point::new(0.0, 1000.0),
            PieceId(5),
            Point::new(1000.0, 1000.0),
            direction,
            min,
            max,
        );
        ValidDestinations::compute(grid, obstruction, &request, &BoardConfig::default()).unwrap()
    }

    /// Click `units` game units from the target along `(dx, dy)`.
    fn click(dx: f64, dy: f64, units: f64) -> Point {
        let axis = Point::new(dx, dy).normalized().unwrap();
        Point::new(1000.0, 1000.0) + axis * (units * 20.0)
    }

    #[test]
    fn annulus_rejects_accepts_and_clamps() {
        let grid = gridless();
        let destinations = continuous(&grid, &NoObstruction, MovementDirection::Any, 5.0, 15.0);
        let resolver = PointerResolver::new(&grid, &NoObstruction);
        let origin = Point::new(1000.0, 1000.0);

        assert_eq!(resolver.resolve(&destinations, click(1.0, 1.0, 20.0)), None);

        let inside = click(0.0, 1.0, 10.0);
        let resolved = resolver.resolve(&destinations, inside).unwrap();
        assert_eq!(resolved.center, inside);
        assert_eq!(resolved.address, None);

        let short = resolver.resolve(&destinations, click(0.0, 1.0, 3.9)).unwrap();
        assert!((grid.measure(origin, short.center) - 5.0).abs() < EPS);
        assert!((short.center.x - 1000.0).abs() < EPS);

        let long = resolver.resolve(&destinations, click(-1.0, 0.0, 16.0)).unwrap();
        assert!((grid.measure(origin, long.center) - 15.0).abs() < EPS);

        assert_eq!(resolver.resolve(&destinations, click(0.0, 1.0, 3.7)), None);
    }

    #[test]
    fn accepted_points_stay_in_range_and_direction() {
        let grid = gridless();
        let source = Point::new(611.9, 874.3);
        let origin = Point::new(1003.7, 1211.3);
        let resolver = PointerResolver::new(&grid, &NoObstruction);

        for direction in [
            MovementDirection::Any,
            MovementDirection::Push,
            MovementDirection::Pull,
            MovementDirection::PushOrPull,
        ] {
            let request = MovementRequest::new(source, PieceId(5), origin, direction, 5.0, 15.0);
            let destinations =
                ValidDestinations::compute(&grid, &NoObstruction, &request, &BoardConfig::default())
                    .unwrap();

            let mut accepted = 0;
            for x in (-400..=400).step_by(3) {
                for y in (-400..=400).step_by(3) {
                    let click = origin + Point::new(f64::from(x) + 0.37, f64::from(y) - 0.61);
                    let Some(resolution) = resolver.resolve(&destinations, click) else {
                        continue;
                    };
                    accepted += 1;
                    let moved = grid.measure(origin, resolution.center);
                    assert!(request.in_range(moved), "{direction}: moved {moved}");
                    assert!(direction.accepts(&grid, source, origin, resolution.center));
                }
            }
            assert!(accepted > 0, "{direction}: nothing accepted");
        }
    }

    #[test]
    fn zero_range_rejects_every_click() {
        let grid = gridless();
        let resolver = PointerResolver::new(&grid, &NoObstruction);
        for direction in [MovementDirection::Any, MovementDirection::PushOrPull] {
            let destinations = continuous(&grid, &NoObstruction, direction, 0.0, 0.0);
            for units in [0.0, 0.5, 1.0, 1.2, 3.0] {
                for (dx, dy) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0)] {
                    let point = if units == 0.0 {
                        Point::new(1000.0, 1000.0)
                    } else {
                        click(dx, dy, units)
                    };
                    assert_eq!(resolver.resolve(&destinations, point), None);
                }
            }
        }
    }

    #[test]
    fn push_band_projects_clicks_onto_the_axis() {
        let grid = gridless();
        let destinations = continuous(&grid, &NoObstruction, MovementDirection::Push, 0.0, 10.0);
        let resolver = PointerResolver::new(&grid, &NoObstruction);

        // Slightly off-axis, within tolerance: snapped onto the ray.
        let resolved = resolver
            .resolve(&destinations, Point::new(1100.0, 1015.0))
            .unwrap();
        assert_eq!(resolved.center, Point::new(1100.0, 1000.0));

        // Too far off-axis.
        assert_eq!(resolver.resolve(&destinations, Point::new(1100.0, 1030.0)), None);
        // Behind the target, toward the source.
        assert_eq!(resolver.resolve(&destinations, Point::new(900.0, 1000.0)), None);
        // Just past the far end: clamped back.
        let clamped = resolver
            .resolve(&destinations, Point::new(1220.0, 1000.0))
            .unwrap();
        assert_eq!(clamped.center, Point::new(1200.0, 1000.0));
    }

    #[test]
    fn push_or_pull_tries_push_then_pull() {
        let grid = gridless();
        let destinations =
            continuous(&grid, &NoObstruction, MovementDirection::PushOrPull, 0.0, 10.0);
        let resolver = PointerResolver::new(&grid, &NoObstruction);
        let source = Point::new(0.0, 1000.0);
        let origin = Point::new(1000.0, 1000.0);

        let pushed = resolver
            .resolve(&destinations, Point::new(1060.0, 1000.0))
            .unwrap();
        assert!(grid.measure(source, pushed.center) > grid.measure(source, origin));

        let pulled = resolver
            .resolve(&destinations, Point::new(940.0, 1000.0))
            .unwrap();
        assert!(grid.measure(source, pulled.center) < grid.measure(source, origin));
    }

    #[test]
    fn obstructed_clicks_are_rejected() {
        let grid = gridless();
        let walls = WallSet::new(vec![Segment::new(
            Point::new(1050.0, 0.0),
            Point::new(1050.0, 2000.0),
        )]);
        let destinations = continuous(&grid, &walls, MovementDirection::Any, 0.0, 10.0);
        let resolver = PointerResolver::new(&grid, &walls);
        assert_eq!(resolver.resolve(&destinations, Point::new(1100.0, 1000.0)), None);
        assert!(resolver.resolve(&destinations, Point::new(900.0, 1000.0)).is_some());
    }

    #[test]
    fn discrete_clicks_snap_to_cells_without_clamping() {
        let grid = SquareGrid::new(5.0, 5.0, DiagonalRule::Equidistant);
        let request = MovementRequest::new(
            Point::new(2.5, 2.5),
            PieceId(2),
            Point::new(7.5, 2.5),
            MovementDirection::Push,
            0.0,
            10.0,
        );
        let destinations =
            ValidDestinations::compute(&grid, &NoObstruction, &request, &BoardConfig::default())
                .unwrap();
        let resolver = PointerResolver::new(&grid, &NoObstruction);

        let resolved = resolver
            .resolve(&destinations, Point::new(16.0, 4.0))
            .unwrap();
        assert_eq!(resolved.address, Some(CellAddress::offset(0, 3)));
        assert_eq!(resolved.center, Point::new(17.5, 2.5));
        assert_eq!(resolved.top_left, Some(Point::new(15.0, 0.0)));

        assert_eq!(resolver.resolve(&destinations, Point::new(1.0, 1.0)), None);
        // One cell beyond range: rejected, not clamped.
        assert_eq!(resolver.resolve(&destinations, Point::new(22.0, 2.0)), None);
    }

    #[test]
    fn resolution_is_idempotent() {
        let grid = Grid::for_topology(GridTopology::Hexagonal, 100.0, 5.0);
        let origin = grid.cell_center(CellAddress::cube(0, 0)).unwrap();
        let source = grid.cell_center(CellAddress::cube(-2, 1)).unwrap();
        let request =
            MovementRequest::new(source, PieceId(1), origin, MovementDirection::Push, 0.0, 10.0);
        let destinations =
            ValidDestinations::compute(&grid, &NoObstruction, &request, &BoardConfig::default())
                .unwrap();
        let resolver = PointerResolver::new(&grid, &NoObstruction);
        for x in (-300..=300).step_by(37) {
            for y in (-300..=300).step_by(41) {
                let point = origin + Point::new(f64::from(x), f64::from(y));
                assert_eq!(
                    resolver.resolve(&destinations, point),
                    resolver.resolve(&destinations, point)
                );
            }
        }
    }
}
