//! Receiving side of forwarded moves.
//!
//! Only a privileged client applies forwarded commands; everyone else drops
//! them so a single peer persists each move.

use board_core::SceneId;
use tracing::{debug, info};

use crate::api::{ForwardMessage, InteractionError, Result};
use crate::executor::MovementExecutor;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RelayOutcome {
    Applied,
    /// Addressed to a scene this client is not viewing.
    OtherScene,
    /// This client may not apply forwarded moves.
    NotPrivileged,
}

pub struct PeerRelay {
    privileged: bool,
    executor: MovementExecutor,
}

impl PeerRelay {
    pub fn new(executor: MovementExecutor, privileged: bool) -> Self {
        Self {
            privileged,
            executor,
        }
    }

    pub fn scene(&self) -> SceneId {
        self.executor.scene()
    }

    /// Decodes and applies a raw socket payload.
    pub async fn handle_json(&self, payload: &str) -> Result<RelayOutcome> {
        let message = ForwardMessage::from_json(payload).map_err(InteractionError::Decode)?;
        self.handle(message).await
    }

    pub async fn handle(&self, message: ForwardMessage) -> Result<RelayOutcome> {
        if !self.privileged {
            debug!(target: "board::relay", "ignoring forwarded move, not privileged");
            return Ok(RelayOutcome::NotPrivileged);
        }
        if message.scene_id() != self.scene() {
            debug!(
                target: "board::relay",
                scene = %message.scene_id(),
                "ignoring forwarded move for another scene"
            );
            return Ok(RelayOutcome::OtherScene);
        }

        match message {
            ForwardMessage::MoveToken {
                token_id,
                coordinates,
                animate,
                ..
            } => {
                self.executor
                    .commit_untracked(token_id, coordinates, animate)
                    .await?;
                info!(target: "board::relay", piece = %token_id, "applied forwarded move");
            }
            ForwardMessage::SwapTokens {
                token_ids: [a, b],
                coordinates,
                animate,
                ..
            } => {
                self.executor
                    .swap_untracked([a, b], coordinates, animate)
                    .await?;
                info!(target: "board::relay", first = %a, second = %b, "applied forwarded swap");
            }
        }
        Ok(RelayOutcome::Applied)
    }
}
