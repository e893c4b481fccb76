use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use board_core::{PieceId, UserId};
use serde_json::json;

use super::lock;
use crate::api::{CommitError, PieceRecord, PieceRegistry, PieceUpdate, UpdateChannel};
use crate::hooks::PreCommitHooks;

/// Piece store plus update pipeline.
///
/// Like a real host it records a `movementHistory` entry on every update
/// before running the installed pre-commit hooks.
#[derive(Default)]
pub struct MemoryBoard {
    pieces: Mutex<HashMap<PieceId, PieceRecord>>,
    grants: Mutex<HashSet<(UserId, PieceId)>>,
    privileged: Mutex<HashSet<UserId>>,
    commits: Mutex<Vec<(PieceId, PieceUpdate)>>,
    failure: Mutex<Option<String>>,
    piece_failures: Mutex<HashMap<PieceId, String>>,
    hooks: PreCommitHooks,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, piece: PieceRecord) {
        lock(&self.pieces).insert(piece.id, piece);
    }

    /// Lets `user` modify `piece`.
    pub fn grant(&self, user: UserId, piece: PieceId) {
        lock(&self.grants).insert((user, piece));
    }

    /// Lets `user` modify every piece.
    pub fn grant_all(&self, user: UserId) {
        lock(&self.privileged).insert(user);
    }

    /// Refuses every following commit with `reason`.
    pub fn fail_commits(&self, reason: impl Into<String>) {
        *lock(&self.failure) = Some(reason.into());
    }

    /// Refuses every following commit for `piece` with `reason`.
    pub fn fail_commits_for(&self, piece: PieceId, reason: impl Into<String>) {
        lock(&self.piece_failures).insert(piece, reason.into());
    }

    /// Persisted updates, in commit order.
    pub fn commits(&self) -> Vec<(PieceId, PieceUpdate)> {
        lock(&self.commits).clone()
    }
}

impl PieceRegistry for MemoryBoard {
    fn piece(&self, id: PieceId) -> Option<PieceRecord> {
        lock(&self.pieces).get(&id).cloned()
    }

    fn can_modify(&self, user: UserId, id: PieceId) -> bool {
        lock(&self.privileged).contains(&user) || lock(&self.grants).contains(&(user, id))
    }
}

#[async_trait]
impl UpdateChannel for MemoryBoard {
    fn hooks(&self) -> &PreCommitHooks {
        &self.hooks
    }

    async fn commit(&self, id: PieceId, mut update: PieceUpdate) -> Result<(), CommitError> {
        tokio::task::yield_now().await;

        let refused = lock(&self.failure)
            .clone()
            .or_else(|| lock(&self.piece_failures).get(&id).cloned());
        if let Some(reason) = refused {
            return Err(CommitError::new(id, reason));
        }

        {
            let mut pieces = lock(&self.pieces);
            let piece = pieces
                .get_mut(&id)
                .ok_or_else(|| CommitError::new(id, "unknown piece"))?;

            update.fields.insert(
                "movementHistory".into(),
                json!([
                    { "x": piece.top_left.x, "y": piece.top_left.y },
                    { "x": update.x, "y": update.y },
                ]),
            );
            self.hooks.apply(id, &mut update);
            piece.top_left = update.top_left();
        }

        lock(&self.commits).push((id, update));
        Ok(())
    }
}
