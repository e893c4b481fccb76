//! Forced-movement destination search.
//!
//! Data flows bottom-up: candidate cells (or a closed-form region on
//! continuous boards) are filtered by range, direction and obstruction into
//! [`ValidDestinations`], which then feeds both [`HighlightRenderer`] and
//! [`PointerResolver`].

mod candidates;
mod destinations;
mod direction;
mod highlight;
mod region;
mod request;
mod resolver;
mod valid_set;

pub use candidates::candidate_cells;
pub use destinations::ValidDestinations;
pub use direction::{Heading, MovementDirection};
pub use highlight::{Highlight, HighlightRenderer, HighlightShape, HighlightStyle};
pub use region::{Band, ContinuousRegion, RegionShape};
pub use request::MovementRequest;
pub use resolver::{PointerResolver, Resolution};
pub use valid_set::{ValidPosition, ValidPositionSet};
