//! Shared, mutable table of installed pre-commit hooks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use board_core::PieceId;
use tracing::debug;

use super::PreCommitHook;
use crate::api::PieceUpdate;

#[derive(Default)]
struct HookTable {
    next_id: u64,
    hooks: Vec<(u64, Arc<dyn PreCommitHook>)>,
}

/// Registry of hooks the host pipeline runs before persisting an update.
///
/// Cloning shares the same table.
#[derive(Clone, Default)]
pub struct PreCommitHooks {
    table: Arc<Mutex<HookTable>>,
}

impl PreCommitHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `hook` until the returned handle drops.
    #[must_use = "the hook is removed as soon as the handle drops"]
    pub fn install(&self, hook: Arc<dyn PreCommitHook>) -> HookHandle {
        let mut table = lock(&self.table);
        let id = table.next_id;
        table.next_id += 1;

        debug!(target: "board::hooks", hook = hook.name(), id, "installed pre-commit hook");

        table.hooks.push((id, hook));
        table.hooks.sort_by_key(|(_, h)| h.priority());

        HookHandle {
            id,
            table: Arc::clone(&self.table),
        }
    }

    /// Runs every applicable hook on `update`, returning how many ran.
    pub fn apply(&self, piece: PieceId, update: &mut PieceUpdate) -> usize {
        // Snapshot so hooks can install or drop handles without deadlocking.
        let hooks: Vec<_> = lock(&self.table)
            .hooks
            .iter()
            .map(|(_, hook)| Arc::clone(hook))
            .collect();

        let mut applied = 0;
        for hook in hooks.iter().filter(|hook| hook.applies_to(piece)) {
            hook.intercept(piece, update);
            applied += 1;
            debug!(target: "board::hooks", hook = hook.name(), %piece, "intercepted update");
        }
        applied
    }

    pub fn len(&self) -> usize {
        lock(&self.table).hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a hook installed; dropping it removes the hook.
pub struct HookHandle {
    id: u64,
    table: Arc<Mutex<HookTable>>,
}

impl Drop for HookHandle {
    fn drop(&mut self) {
        let mut table = lock(&self.table);
        table.hooks.retain(|(id, _)| *id != self.id);
        debug!(target: "board::hooks", id = self.id, "removed pre-commit hook");
    }
}

fn lock(table: &Mutex<HookTable>) -> MutexGuard<'_, HookTable> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}
