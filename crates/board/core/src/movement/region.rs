use arrayvec::ArrayVec;

use crate::config::BoardConfig;
use crate::grid::GridAdapter;
use crate::obstruction::{ObstructionTester, Polygon};
use crate::types::Point;

use super::{Heading, MovementRequest};

/// Straight strip of destinations along the source–target axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub heading: Heading,
    /// Unit vector in pixel space pointing along the band.
    pub axis: Point,
    /// Nearest accepted distance from the target, in game units.
    pub min: f64,
    /// Farthest accepted distance from the target, in game units.
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RegionShape {
    /// Every point whose distance from the target lies in range.
    Annulus,
    /// Push band first, then pull band, for whichever headings apply.
    Bands(ArrayVec<Band, 2>),
}

/// Closed-form destination region on a continuous board.
///
/// Nothing is enumerated: clicks are tested against the shape one at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuousRegion {
    pub request: MovementRequest,
    pub shape: RegionShape,
    /// Slack accepted around the shape, in game units.
    pub tolerance: f64,
    pub pixels_per_unit: f64,
    /// Area reachable from the target without crossing an obstruction.
    pub reachable: Polygon,
}

impl ContinuousRegion {
    pub fn build(
        grid: &dyn GridAdapter,
        obstruction: &dyn ObstructionTester,
        request: &MovementRequest,
        config: &BoardConfig,
    ) -> Self {
        let tolerance = config.tolerance(grid);
        let pixels_per_unit = grid.pixels_per_unit();
        let reach = (request.distance_max + tolerance).max(0.0) * pixels_per_unit;
        let reachable = obstruction.reachable_polygon(request.origin, reach, config.reachable_rays);

        let shape = if request.direction.is_directional() {
            RegionShape::Bands(bands(grid, request))
        } else {
            RegionShape::Annulus
        };

        Self {
            request: *request,
            shape,
            tolerance,
            pixels_per_unit,
            reachable,
        }
    }

    pub fn bands(&self) -> &[Band] {
        match &self.shape {
            RegionShape::Annulus => &[],
            RegionShape::Bands(bands) => bands.as_slice(),
        }
    }

    /// True when no click can ever resolve.
    pub fn is_empty(&self) -> bool {
        if self.request.distance_max <= 0.0 {
            return true;
        }
        matches!(&self.shape, RegionShape::Bands(bands) if bands.is_empty())
    }

    /// Point `distance` game units from the target along `axis`.
    pub fn point_along(&self, axis: Point, distance: f64) -> Point {
        self.request.origin + axis * (distance * self.pixels_per_unit)
    }
}

fn bands(grid: &dyn GridAdapter, request: &MovementRequest) -> ArrayVec<Band, 2> {
    let mut bands = ArrayVec::new();
    // Coincident pieces have no axis to push or pull along.
    let Some(away) = (request.origin - request.source).normalized() else {
        return bands;
    };
    let separation = grid.measure(request.source, request.origin);

    for heading in request.direction.headings() {
        let band = match heading {
            Heading::Away => Band {
                heading,
                axis: away,
                min: request.distance_min,
                max: request.distance_max,
            },
            // Pulling never carries the target past the source.
            Heading::Toward => Band {
                heading,
                axis: -away,
                min: request.distance_min,
                max: request.distance_max.min(separation),
            },
        };
        if band.max >= band.min {
            bands.push(band);
        }
    }
    bands
}

impl Heading {
    /// Re-checks a resolved point with the single-heading predicate.
    pub fn accepts(self, grid: &dyn GridAdapter, request: &MovementRequest, point: Point) -> bool {
        self.direction()
            .accepts(grid, request.source, request.origin, point)
    }
}
