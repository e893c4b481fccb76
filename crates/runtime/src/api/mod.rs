//! Public API surface: errors, host collaborator traits and wire types.
pub mod errors;
pub mod providers;
pub mod types;

pub use errors::{CommitError, ForwardError, InteractionError, Result};
pub use providers::{
    Indicator, NoticeLevel, Notifier, OverlaySurface, PeerChannel, PieceRegistry, ToolControls,
    ToolSnapshot, TracingNotifier, UpdateChannel,
};
pub use types::{ForwardMessage, PieceRecord, PieceUpdate};
