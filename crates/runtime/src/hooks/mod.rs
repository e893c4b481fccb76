//! Pre-commit hooks that rewrite piece updates inside the host pipeline.
//!
//! Hooks are installed for the duration of a single commit and removed when
//! the returned [`HookHandle`] drops, so they never leak into later updates.

mod history;
mod registry;

pub use history::{MOVEMENT_HISTORY_FIELDS, StripMovementHistory};
pub use registry::{HookHandle, PreCommitHooks};

use board_core::PieceId;

use crate::api::PieceUpdate;

/// Rewrites an outgoing update before the host persists it.
pub trait PreCommitHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging).
    fn name(&self) -> &'static str;

    /// Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    /// Whether this hook wants to see updates for `piece`.
    fn applies_to(&self, piece: PieceId) -> bool;

    fn intercept(&self, piece: PieceId, update: &mut PieceUpdate);
}
