use crate::error::MovementError;
use crate::grid::{CellPolygon, GridAdapter};
use crate::obstruction::Polygon;
use crate::types::{CellAddress, Point};

use super::{ContinuousRegion, Heading, RegionShape, ValidDestinations, ValidPositionSet};

/// Fill used for destination highlights.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightStyle {
    /// 0xRRGGBB
    pub color: u32,
    pub alpha: f32,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: 0x33_99_ff,
            alpha: 0.35,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HighlightShape {
    Cell {
        address: CellAddress,
        polygon: CellPolygon,
    },
    /// Ring between two radii, in pixels.
    Annulus { center: Point, inner: f64, outer: f64 },
    Band { heading: Heading, polygon: [Point; 4] },
}

/// Everything the overlay surface needs to paint the valid destinations.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlight {
    pub shapes: Vec<HighlightShape>,
    /// Paint is masked to this polygon when present.
    pub clip: Option<Polygon>,
    pub style: HighlightStyle,
}

/// Turns valid destinations into paintable shapes.
pub struct HighlightRenderer<'a> {
    grid: &'a dyn GridAdapter,
    style: HighlightStyle,
}

impl<'a> HighlightRenderer<'a> {
    pub fn new(grid: &'a dyn GridAdapter) -> Self {
        Self {
            grid,
            style: HighlightStyle::default(),
        }
    }

    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    pub fn render(&self, destinations: &ValidDestinations) -> Result<Highlight, MovementError> {
        match destinations {
            ValidDestinations::Discrete(set) => self.render_cells(set),
            ValidDestinations::Continuous(region) => Ok(self.render_region(region)),
        }
    }

    fn render_cells(&self, set: &ValidPositionSet) -> Result<Highlight, MovementError> {
        let shapes = set
            .iter()
            .map(|position| {
                Ok(HighlightShape::Cell {
                    address: position.address,
                    polygon: self.grid.cell_polygon(position.address)?,
                })
            })
            .collect::<Result<Vec<_>, MovementError>>()?;

        Ok(Highlight {
            shapes,
            clip: None,
            style: self.style,
        })
    }

    fn render_region(&self, region: &ContinuousRegion) -> Highlight {
        let request = &region.request;
        let shapes = match &region.shape {
            RegionShape::Annulus => vec![HighlightShape::Annulus {
                center: request.origin,
                inner: request.distance_min * region.pixels_per_unit,
                outer: request.distance_max * region.pixels_per_unit,
            }],
            RegionShape::Bands(bands) => {
                // Thin bands stay clickable: half-width equals the click tolerance.
                let half_width = region.tolerance * region.pixels_per_unit;
                bands
                    .iter()
                    .map(|band| {
                        let start = region.point_along(band.axis, band.min);
                        let end = region.point_along(band.axis, band.max);
                        let side = band.axis.perp() * half_width;
                        HighlightShape::Band {
                            heading: band.heading,
                            polygon: [start + side, end + side, end - side, start - side],
                        }
                    })
                    .collect()
            }
        };

        Highlight {
            shapes,
            clip: Some(region.reachable.clone()),
            style: self.style,
        }
    }
}
