//! Interactive sessions on top of `board-core`.
//!
//! This crate turns the pure destination math into user-facing sessions:
//! it draws highlights, listens to board input, resolves clicks, and
//! commits (or forwards) the chosen move through host collaborators.
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the facade and builder
//! - [`api`] exposes errors, host collaborator traits and wire types
//! - [`interaction`] and [`targeting`] drive the two kinds of session
//! - [`executor`] and [`relay`] commit moves locally or via a privileged peer
//! - [`hooks`] provides pre-commit interception for the host pipeline
//! - [`input`] fans host input out to active sessions
//! - [`memory`] provides in-memory collaborators for demos and tests
pub mod api;
pub mod config;
pub mod engine;
pub mod executor;
pub mod hooks;
pub mod input;
pub mod interaction;
pub mod memory;
pub mod relay;
pub mod targeting;

mod session;

pub use api::{
    CommitError, ForwardError, ForwardMessage, Indicator, InteractionError, NoticeLevel, Notifier,
    OverlaySurface, PeerChannel, PieceRecord, PieceRegistry, PieceUpdate, Result, ToolControls,
    ToolSnapshot, TracingNotifier, UpdateChannel,
};
pub use config::RuntimeConfig;
pub use engine::{Engine, EngineBuilder};
pub use executor::{ExecutionOutcome, MovementExecutor};
pub use hooks::{HookHandle, PreCommitHook, PreCommitHooks, StripMovementHistory};
pub use input::{DispatchOutcome, InputEvent, InputHub, InputSubscription, Key, PointerButton};
pub use interaction::{ForcedMovement, InteractionController, InteractionState};
pub use relay::{PeerRelay, RelayOutcome};
pub use targeting::{SelectionState, TargetSelectionController};
