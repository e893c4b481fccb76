//! Commits resolved destinations, or forwards them to a privileged peer.

use std::sync::Arc;

use board_core::{PieceId, Point, Resolution, SceneId, UserId};
use tracing::{debug, error, info, warn};

use crate::api::{
    CommitError, ForwardMessage, InteractionError, PeerChannel, PieceRecord, PieceRegistry,
    PieceUpdate, Result, UpdateChannel,
};
use crate::hooks::StripMovementHistory;

/// How a move left this client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ExecutionOutcome {
    /// Persisted through the local update pipeline.
    Committed,
    /// Sent to a privileged peer to persist on our behalf.
    Forwarded,
}

/// Applies forced moves for one user on one scene.
#[derive(Clone)]
pub struct MovementExecutor {
    user: UserId,
    scene: SceneId,
    registry: Arc<dyn PieceRegistry>,
    updates: Arc<dyn UpdateChannel>,
    peers: Arc<dyn PeerChannel>,
    animate: bool,
}

impl MovementExecutor {
    pub fn new(
        user: UserId,
        scene: SceneId,
        registry: Arc<dyn PieceRegistry>,
        updates: Arc<dyn UpdateChannel>,
        peers: Arc<dyn PeerChannel>,
    ) -> Self {
        Self {
            user,
            scene,
            registry,
            updates,
            peers,
            animate: true,
        }
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Moves `piece` so that its center lands on `destination`.
    ///
    /// The corner is always derived from the piece's own size; a snapped
    /// cell's corner only fits pieces one cell wide.
    pub async fn move_piece(
        &self,
        piece: &PieceRecord,
        destination: &Resolution,
    ) -> Result<ExecutionOutcome> {
        let top_left = piece.top_left_for_center(destination.center);
        self.move_to(piece.id, top_left).await
    }

    /// Moves `id` so its top-left corner sits at `top_left`.
    pub async fn move_to(&self, id: PieceId, top_left: Point) -> Result<ExecutionOutcome> {
        if !self.registry.can_modify(self.user, id) {
            self.forward(ForwardMessage::MoveToken {
                scene_id: self.scene,
                token_id: id,
                coordinates: top_left,
                animate: self.animate,
            })?;
            return Ok(ExecutionOutcome::Forwarded);
        }

        self.commit_untracked(id, top_left, self.animate).await?;
        info!(target: "board::executor", piece = %id, x = top_left.x, y = top_left.y, "committed move");
        Ok(ExecutionOutcome::Committed)
    }

    /// Exchanges the positions of two pieces.
    pub async fn swap(&self, a: PieceId, b: PieceId) -> Result<ExecutionOutcome> {
        let first = self
            .registry
            .piece(a)
            .ok_or(InteractionError::PieceNotFound(a))?;
        let second = self
            .registry
            .piece(b)
            .ok_or(InteractionError::PieceNotFound(b))?;

        if !(self.registry.can_modify(self.user, a) && self.registry.can_modify(self.user, b)) {
            self.forward(ForwardMessage::SwapTokens {
                scene_id: self.scene,
                token_ids: [a, b],
                coordinates: [second.top_left, first.top_left],
                animate: self.animate,
            })?;
            return Ok(ExecutionOutcome::Forwarded);
        }

        self.swap_untracked([a, b], [second.top_left, first.top_left], self.animate)
            .await?;
        info!(target: "board::executor", first = %a, second = %b, "swapped pieces");
        Ok(ExecutionOutcome::Committed)
    }

    /// Moves both pieces, or neither: if the second commit is refused the
    /// first piece is put back where it started.
    pub(crate) async fn swap_untracked(
        &self,
        [a, b]: [PieceId; 2],
        [a_to, b_to]: [Point; 2],
        animate: bool,
    ) -> Result<()> {
        let restore = self
            .registry
            .piece(a)
            .ok_or(InteractionError::PieceNotFound(a))?
            .top_left;

        self.commit_untracked(a, a_to, animate).await?;
        if let Err(err) = self.commit_untracked(b, b_to, animate).await {
            warn!(
                target: "board::executor",
                first = %a,
                second = %b,
                reason = %err,
                "second half of swap refused, restoring first piece"
            );
            if let Err(rollback) = self.commit_untracked(a, restore, false).await {
                error!(
                    target: "board::executor",
                    piece = %a,
                    reason = %rollback,
                    "could not restore piece after failed swap"
                );
            }
            return Err(err.into());
        }
        Ok(())
    }

    /// Commits through the host pipeline with movement tracking stripped for
    /// `id` only. The hook lives exactly as long as this commit.
    pub(crate) async fn commit_untracked(
        &self,
        id: PieceId,
        top_left: Point,
        animate: bool,
    ) -> std::result::Result<(), CommitError> {
        let _hook = self
            .updates
            .hooks()
            .install(Arc::new(StripMovementHistory::new(id)));

        debug!(target: "board::executor", piece = %id, "committing update");
        self.updates
            .commit(id, PieceUpdate::new(top_left, animate))
            .await
    }

    fn forward(&self, message: ForwardMessage) -> Result<()> {
        warn!(
            target: "board::executor",
            user = %self.user,
            scene = %self.scene,
            ?message,
            "missing permission, forwarding to a privileged peer"
        );
        self.peers.emit(&message)?;
        Ok(())
    }
}
