use crate::grid::GridAdapter;

/// Tunable parameters for destination search and pointer resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardConfig {
    /// Fraction of one grid unit accepted as slack around continuous regions.
    pub tolerance_fraction: f64,
    /// Number of rays cast when building the obstruction-reachable polygon.
    pub reachable_rays: usize,
}

impl BoardConfig {
    pub const DEFAULT_TOLERANCE_FRACTION: f64 = 0.25;
    pub const DEFAULT_REACHABLE_RAYS: usize = 120;
    /// Fewer rays than this produce a polygon too coarse to clip against.
    pub const MIN_REACHABLE_RAYS: usize = 8;

    pub fn new() -> Self {
        Self {
            tolerance_fraction: Self::DEFAULT_TOLERANCE_FRACTION,
            reachable_rays: Self::DEFAULT_REACHABLE_RAYS,
        }
    }

    pub fn with_tolerance_fraction(mut self, fraction: f64) -> Self {
        self.tolerance_fraction = fraction.max(0.0);
        self
    }

    pub fn with_reachable_rays(mut self, rays: usize) -> Self {
        self.reachable_rays = rays.max(Self::MIN_REACHABLE_RAYS);
        self
    }

    /// Tolerance margin expressed in game units for the given grid.
    pub fn tolerance(&self, grid: &dyn GridAdapter) -> f64 {
        self.tolerance_fraction * grid.distance()
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new()
    }
}
