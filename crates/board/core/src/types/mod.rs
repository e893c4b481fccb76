//! Plain data shared by every board component.
mod cell;
mod common;
mod point;

pub use cell::{CellAddress, GridTopology};
pub use common::{PieceId, SceneId, UserId};
pub use point::Point;
