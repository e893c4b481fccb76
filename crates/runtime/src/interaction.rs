//! Forced-movement sessions: highlight, listen, resolve, commit.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use board_core::{
    BoardError, GridAdapter, HighlightRenderer, MovementDirection, MovementError, MovementRequest,
    ObstructionTester, PieceId, PointerResolver, Resolution, ValidDestinations,
};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::api::{
    Indicator, InteractionError, Notifier, OverlaySurface, PieceRecord, PieceRegistry, Result,
};
use crate::config::RuntimeConfig;
use crate::executor::{ExecutionOutcome, MovementExecutor};
use crate::input::{InputEvent, InputHub, Key, PointerButton};
use crate::session::{ActivationLatch, SessionGuard};

/// Lifecycle of one forced-movement session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum InteractionState {
    #[default]
    Idle,
    Initializing,
    Listening,
    Resolved,
    Cancelled,
}

/// One push/pull/slide the user is choosing a destination for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForcedMovement {
    pub source: PieceId,
    pub target: PieceId,
    pub direction: MovementDirection,
    pub distance_min: f64,
    pub distance_max: f64,
}

impl ForcedMovement {
    pub fn new(
        source: PieceId,
        target: PieceId,
        direction: MovementDirection,
        distance_min: f64,
        distance_max: f64,
    ) -> Self {
        Self {
            source,
            target,
            direction,
            distance_min,
            distance_max,
        }
    }
}

/// Drives forced-movement sessions against one board.
pub struct InteractionController {
    grid: Arc<dyn GridAdapter>,
    obstruction: Arc<dyn ObstructionTester>,
    registry: Arc<dyn PieceRegistry>,
    overlay: Arc<dyn OverlaySurface>,
    notifier: Arc<dyn Notifier>,
    input: InputHub,
    executor: MovementExecutor,
    config: RuntimeConfig,
    state: watch::Sender<InteractionState>,
    transitions: broadcast::Sender<InteractionState>,
    active: AtomicBool,
}

/// Transitions buffered per lagging subscriber.
const TRANSITION_BUFFER: usize = 16;

impl InteractionController {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        grid: Arc<dyn GridAdapter>,
        obstruction: Arc<dyn ObstructionTester>,
        registry: Arc<dyn PieceRegistry>,
        overlay: Arc<dyn OverlaySurface>,
        notifier: Arc<dyn Notifier>,
        input: InputHub,
        executor: MovementExecutor,
        config: RuntimeConfig,
    ) -> Self {
        let (state, _) = watch::channel(InteractionState::Idle);
        let (transitions, _) = broadcast::channel(TRANSITION_BUFFER);
        Self {
            grid,
            obstruction,
            registry,
            overlay,
            notifier,
            input,
            executor,
            config,
            state,
            transitions,
            active: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> InteractionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<InteractionState> {
        self.state.subscribe()
    }

    /// Every transition in order, including short-lived states a `watch`
    /// receiver can miss.
    pub fn transitions(&self) -> broadcast::Receiver<InteractionState> {
        self.transitions.subscribe()
    }

    /// Runs one session to completion.
    ///
    /// Returns `Ok(true)` once a destination was resolved and handed to the
    /// executor, `Ok(false)` when the user cancelled or nothing was
    /// reachable. Teardown happens on every exit path.
    pub async fn activate(&self, movement: ForcedMovement) -> Result<bool> {
        let _latch = ActivationLatch::acquire(&self.active)?;
        let outcome = self.run(movement).await;
        self.transition(InteractionState::Idle);
        outcome
    }

    async fn run(&self, movement: ForcedMovement) -> Result<bool> {
        self.transition(InteractionState::Initializing);

        let source = self
            .registry
            .piece(movement.source)
            .ok_or(InteractionError::PieceNotFound(movement.source))?;
        let target = self
            .registry
            .piece(movement.target)
            .ok_or(InteractionError::PieceNotFound(movement.target))?;

        let request = MovementRequest::new(
            source.center(),
            target.id,
            target.center(),
            movement.direction,
            movement.distance_min,
            movement.distance_max,
        );

        let destinations = match ValidDestinations::compute(
            self.grid.as_ref(),
            self.obstruction.as_ref(),
            &request,
            &self.config.board,
        ) {
            Ok(destinations) => destinations,
            Err(MovementError::NoValidDestination { target: id }) => {
                warn!(target: "board::interaction", piece = %id, "no valid destination");
                self.notifier
                    .warn(&format!("{} has nowhere to be moved.", target.name));
                self.transition(InteractionState::Cancelled);
                return Ok(false);
            }
            Err(e) => {
                error!(
                    target: "board::interaction",
                    code = e.error_code(),
                    severity = e.severity().as_str(),
                    error = %e,
                    "destination search failed"
                );
                return Err(e.into());
            }
        };
        match &destinations {
            ValidDestinations::Discrete(set) => debug!(
                target: "board::interaction",
                piece = %target.id,
                candidates = set.len(),
                "destinations computed"
            ),
            ValidDestinations::Continuous(region) => debug!(
                target: "board::interaction",
                piece = %target.id,
                empty = region.is_empty(),
                "continuous region built"
            ),
        }
        let highlight = HighlightRenderer::new(self.grid.as_ref()).render(&destinations)?;

        let mut session =
            SessionGuard::open("forced_movement", Arc::clone(&self.overlay), &self.input);
        self.overlay.draw_highlight(&highlight);
        if self.config.show_input_indicator && !destinations.is_discrete() {
            self.overlay.draw_indicator(&Indicator::new(
                format!("{}: click inside the highlighted area", movement.direction),
                None,
            ));
        }
        self.transition(InteractionState::Listening);

        let resolver = PointerResolver::new(self.grid.as_ref(), self.obstruction.as_ref());
        let resolution = loop {
            let Some(event) = session.next_event().await else {
                break None;
            };
            match event {
                InputEvent::PointerDown {
                    button: PointerButton::Primary,
                    position,
                } => match resolver.resolve(&destinations, position) {
                    Some(resolution) => break Some(resolution),
                    None => debug!(
                        target: "board::interaction",
                        x = position.x,
                        y = position.y,
                        "click rejected"
                    ),
                },
                InputEvent::PointerMove { position } => self.overlay.edge_pan(position),
                InputEvent::ContextMenu { .. } | InputEvent::KeyDown { key: Key::Escape } => {
                    break None;
                }
                _ => {}
            }
        };

        let Some(resolution) = resolution else {
            self.transition(InteractionState::Cancelled);
            info!(target: "board::interaction", piece = %target.id, "forced movement cancelled");
            return Ok(false);
        };

        self.transition(InteractionState::Resolved);
        drop(session);

        if !resolver.still_clear(request.origin, &resolution) {
            warn!(target: "board::interaction", piece = %target.id, "destination became blocked");
            self.notifier.warn("That destination is no longer reachable.");
            return Ok(false);
        }

        self.execute(&target, &resolution).await
    }

    async fn execute(&self, target: &PieceRecord, resolution: &Resolution) -> Result<bool> {
        match self.executor.move_piece(target, resolution).await {
            Ok(ExecutionOutcome::Committed) => {
                info!(
                    target: "board::interaction",
                    piece = %target.id,
                    x = resolution.center.x,
                    y = resolution.center.y,
                    "forced movement resolved"
                );
                Ok(true)
            }
            Ok(ExecutionOutcome::Forwarded) => {
                info!(target: "board::interaction", piece = %target.id, "forced movement forwarded");
                Ok(true)
            }
            // The destination was chosen; a refused commit is reported, not retried.
            Err(InteractionError::Commit(e)) => {
                error!(target: "board::interaction", piece = %target.id, error = %e, "commit failed");
                self.notifier
                    .error(&format!("Could not move {}: {}", target.name, e.reason));
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }

    fn transition(&self, next: InteractionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            debug!(target: "board::interaction", from = %previous, to = %next, "state transition");
            // No subscribers is fine.
            let _ = self.transitions.send(next);
        }
    }
}
