use board_core::PieceId;

use super::PreCommitHook;
use crate::api::PieceUpdate;

/// Keys the host uses to record movement paths on an update.
pub const MOVEMENT_HISTORY_FIELDS: [&str; 4] =
    ["movementHistory", "_movementHistory", "movement", "waypoints"];

/// Drops movement-tracking keys so a forced move does not count against the
/// piece's own movement.
#[derive(Clone, Copy, Debug)]
pub struct StripMovementHistory {
    piece: PieceId,
}

impl StripMovementHistory {
    pub fn new(piece: PieceId) -> Self {
        Self { piece }
    }
}

impl PreCommitHook for StripMovementHistory {
    fn name(&self) -> &'static str {
        "strip_movement_history"
    }

    // Runs after hooks that might add tracking data.
    fn priority(&self) -> i32 {
        100
    }

    fn applies_to(&self, piece: PieceId) -> bool {
        piece == self.piece
    }

    fn intercept(&self, _piece: PieceId, update: &mut PieceUpdate) {
        for field in MOVEMENT_HISTORY_FIELDS {
            update.fields.remove(field);
        }
    }
}
