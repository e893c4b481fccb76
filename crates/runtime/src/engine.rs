//! Engine facade and builder.
//!
//! [`Engine`] wires the host collaborators into the two session controllers
//! and exposes the entry points a host calls.

use std::sync::Arc;

use board_core::{
    GridAdapter, MovementDirection, NoObstruction, ObstructionTester, PieceId, SceneId, UserId,
};

use crate::api::{
    InteractionError, Notifier, OverlaySurface, PeerChannel, PieceRegistry, Result, ToolControls,
    TracingNotifier, UpdateChannel,
};
use crate::config::RuntimeConfig;
use crate::executor::MovementExecutor;
use crate::input::InputHub;
use crate::interaction::{ForcedMovement, InteractionController};
use crate::relay::PeerRelay;
use crate::targeting::TargetSelectionController;

pub struct Engine {
    input: InputHub,
    executor: MovementExecutor,
    interaction: InteractionController,
    targeting: TargetSelectionController,
}

impl Engine {
    /// Create a new builder for configuring the engine
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Lets the user pick where `target` is pushed, pulled or slid.
    ///
    /// Returns `Ok(true)` when a destination was chosen and committed (or
    /// forwarded), `Ok(false)` on cancellation or when nothing is reachable.
    pub async fn activate_forced_movement(
        &self,
        source: PieceId,
        target: PieceId,
        direction: MovementDirection,
        distance_min: f64,
        distance_max: f64,
    ) -> Result<bool> {
        self.interaction
            .activate(ForcedMovement::new(
                source,
                target,
                direction,
                distance_min,
                distance_max,
            ))
            .await
    }

    /// Lets the user acquire `required` targets described by `label`.
    pub async fn activate_target_selection(&self, required: usize, label: &str) -> Result<bool> {
        self.targeting.activate(required, label).await
    }

    /// Input entry point the host feeds raw board events into.
    pub fn input(&self) -> &InputHub {
        &self.input
    }

    pub fn executor(&self) -> &MovementExecutor {
        &self.executor
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn targeting(&self) -> &TargetSelectionController {
        &self.targeting
    }

    /// Relay for moves forwarded by other clients on this scene.
    pub fn relay(&self, privileged: bool) -> PeerRelay {
        PeerRelay::new(self.executor.clone(), privileged)
    }
}

/// Builder for [`Engine`].
///
/// Grid, registry, update channel, peer channel, overlay and tool controls
/// are required. Obstruction defaults to an open board and notices default
/// to `tracing`.
pub struct EngineBuilder {
    config: RuntimeConfig,
    user: UserId,
    scene: SceneId,
    grid: Option<Arc<dyn GridAdapter>>,
    obstruction: Arc<dyn ObstructionTester>,
    registry: Option<Arc<dyn PieceRegistry>>,
    updates: Option<Arc<dyn UpdateChannel>>,
    peers: Option<Arc<dyn PeerChannel>>,
    notifier: Arc<dyn Notifier>,
    overlay: Option<Arc<dyn OverlaySurface>>,
    tools: Option<Arc<dyn ToolControls>>,
    input: InputHub,
}

impl EngineBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            user: UserId::default(),
            scene: SceneId::default(),
            grid: None,
            obstruction: Arc::new(NoObstruction),
            registry: None,
            updates: None,
            peers: None,
            notifier: Arc::new(TracingNotifier),
            overlay: None,
            tools: None,
            input: InputHub::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// User the engine acts for, and the scene it is viewing.
    pub fn session(mut self, user: UserId, scene: SceneId) -> Self {
        self.user = user;
        self.scene = scene;
        self
    }

    pub fn grid(mut self, grid: Arc<dyn GridAdapter>) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn obstruction(mut self, obstruction: Arc<dyn ObstructionTester>) -> Self {
        self.obstruction = obstruction;
        self
    }

    pub fn registry(mut self, registry: Arc<dyn PieceRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn updates(mut self, updates: Arc<dyn UpdateChannel>) -> Self {
        self.updates = Some(updates);
        self
    }

    pub fn peers(mut self, peers: Arc<dyn PeerChannel>) -> Self {
        self.peers = Some(peers);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn overlay(mut self, overlay: Arc<dyn OverlaySurface>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn tools(mut self, tools: Arc<dyn ToolControls>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Share an existing input hub instead of creating one.
    pub fn input(mut self, input: InputHub) -> Self {
        self.input = input;
        self
    }

    pub fn build(self) -> Result<Engine> {
        let grid = self.grid.ok_or(InteractionError::MissingCollaborator("grid"))?;
        let registry = self
            .registry
            .ok_or(InteractionError::MissingCollaborator("piece registry"))?;
        let updates = self
            .updates
            .ok_or(InteractionError::MissingCollaborator("update channel"))?;
        let peers = self
            .peers
            .ok_or(InteractionError::MissingCollaborator("peer channel"))?;
        let overlay = self
            .overlay
            .ok_or(InteractionError::MissingCollaborator("overlay surface"))?;
        let tools = self
            .tools
            .ok_or(InteractionError::MissingCollaborator("tool controls"))?;

        let executor = MovementExecutor::new(
            self.user,
            self.scene,
            Arc::clone(&registry),
            updates,
            peers,
        )
        .with_animate(self.config.animate);

        let interaction = InteractionController::new(
            grid,
            self.obstruction,
            registry,
            Arc::clone(&overlay),
            self.notifier,
            self.input.clone(),
            executor.clone(),
            self.config,
        );
        let targeting = TargetSelectionController::new(overlay, tools, self.input.clone());

        Ok(Engine {
            input: self.input,
            executor,
            interaction,
            targeting,
        })
    }
}
