//! Unified error types surfaced by the runtime API.
//!
//! Expected outcomes (nothing reachable, click blocked, permission missing)
//! are not errors; they surface as `Ok(false)` or as forwarding.
use board_core::{MovementError, PieceId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InteractionError>;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("piece {0} not found")]
    PieceNotFound(PieceId),

    #[error("a session is already active on this controller")]
    SessionActive,

    #[error("engine requires a {0} before building")]
    MissingCollaborator(&'static str),

    #[error(transparent)]
    Movement(#[from] MovementError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error(transparent)]
    Forward(#[from] ForwardError),

    #[error("malformed forwarded message")]
    Decode(#[source] serde_json::Error),
}

/// The host's update pipeline refused a commit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("commit for piece {piece} rejected: {reason}")]
pub struct CommitError {
    pub piece: PieceId,
    pub reason: String,
}

impl CommitError {
    pub fn new(piece: PieceId, reason: impl Into<String>) -> Self {
        Self {
            piece,
            reason: reason.into(),
        }
    }
}

/// The peer transport could not send a forwarded command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardError {
    #[error("no privileged peer is connected")]
    NoPeer,

    #[error("peer transport failed: {0}")]
    Transport(String),
}
