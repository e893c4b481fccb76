//! Board geometry for forced movement.
//!
//! `board-core` computes where a piece may be pushed, pulled or freely moved,
//! paints nothing itself, and answers which destination a click selects.
//! It runs on square, hexagonal and gridless boards through the
//! [`grid::GridAdapter`] abstraction, and defers collision questions to an
//! injected [`obstruction::ObstructionTester`]. Everything here is pure and
//! synchronous; session orchestration lives in `board-runtime`.
pub mod config;
pub mod error;
pub mod grid;
pub mod movement;
pub mod obstruction;
pub mod types;

pub use config::BoardConfig;
pub use error::{BoardError, ErrorSeverity, MovementError};
pub use grid::{
    DiagonalRule, DistanceMeasurer, Grid, GridAdapter, GridlessGrid, HexGrid, HexOrientation,
    SquareGrid,
};
pub use movement::{
    Highlight, HighlightRenderer, HighlightShape, MovementDirection, MovementRequest,
    PointerResolver, Resolution, ValidDestinations, ValidPositionSet,
};
pub use obstruction::{NoObstruction, ObstructionTester, Polygon, Segment, WallSet};
pub use types::{CellAddress, GridTopology, PieceId, Point, SceneId, UserId};
