//! Host collaborators the runtime talks to.
//!
//! Everything the engine needs from the surrounding application is behind
//! one of these traits, so hosts can plug in their own canvas, document
//! store and socket layer while tests use [`crate::memory`].
use async_trait::async_trait;
use board_core::{Highlight, PieceId, Point, UserId};

use super::errors::{CommitError, ForwardError};
use super::types::{ForwardMessage, PieceRecord, PieceUpdate};
use crate::hooks::PreCommitHooks;

/// Read access to the pieces on the active scene.
pub trait PieceRegistry: Send + Sync {
    fn piece(&self, id: PieceId) -> Option<PieceRecord>;

    /// Whether `user` may commit updates for `id` without a privileged peer.
    fn can_modify(&self, user: UserId, id: PieceId) -> bool;
}

/// The host's document update pipeline.
///
/// Implementations must run [`PreCommitHooks::apply`] on every update before
/// persisting it.
#[async_trait]
pub trait UpdateChannel: Send + Sync {
    fn hooks(&self) -> &PreCommitHooks;

    /// Resolves once the update has been persisted (or refused).
    async fn commit(&self, id: PieceId, update: PieceUpdate) -> Result<(), CommitError>;
}

/// Socket to other connected clients.
pub trait PeerChannel: Send + Sync {
    fn emit(&self, message: &ForwardMessage) -> Result<(), ForwardError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// User-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);

    fn info(&self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.notify(NoticeLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// Forwards notices to `tracing` when the host has no toast surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => tracing::info!(target: "board::notice", "{message}"),
            NoticeLevel::Warn => tracing::warn!(target: "board::notice", "{message}"),
            NoticeLevel::Error => tracing::error!(target: "board::notice", "{message}"),
        }
    }
}

/// Text drawn next to the pointer (or pinned, when `position` is `None`).
#[derive(Clone, Debug, PartialEq)]
pub struct Indicator {
    pub text: String,
    pub position: Option<Point>,
}

impl Indicator {
    pub fn new(text: impl Into<String>, position: Option<Point>) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// Transient drawing layer above the board.
pub trait OverlaySurface: Send + Sync {
    fn draw_highlight(&self, highlight: &Highlight);

    /// Replaces any previously drawn indicator.
    fn draw_indicator(&self, indicator: &Indicator);

    /// Removes every highlight and indicator this surface drew.
    fn clear(&self);

    /// Pans the view when the pointer nears a viewport edge.
    fn edge_pan(&self, position: Point);

    /// While enabled, board clicks go to the active session instead of
    /// selecting or dragging pieces.
    fn set_input_passthrough(&self, enabled: bool);
}

/// Which control/tool pair the host toolbar had active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolSnapshot {
    pub control: String,
    pub tool: String,
}

impl ToolSnapshot {
    pub fn new(control: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            control: control.into(),
            tool: tool.into(),
        }
    }
}

/// Host toolbar and HUD controls used by target selection.
pub trait ToolControls: Send + Sync {
    fn active_tool(&self) -> ToolSnapshot;

    fn activate_targeting(&self);

    fn restore(&self, snapshot: &ToolSnapshot);

    fn set_hud_hidden(&self, hidden: bool);

    /// Number of targets the user currently has acquired.
    fn target_count(&self) -> usize;
}
