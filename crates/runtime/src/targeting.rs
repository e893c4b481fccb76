//! Target acquisition: switch the host into targeting mode and wait until
//! enough targets are picked, the user confirms early, or cancels.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use board_core::Point;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::api::{Indicator, OverlaySurface, Result, ToolControls};
use crate::input::{InputEvent, InputHub, Key};
use crate::session::{ActivationLatch, SessionGuard};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum SelectionState {
    #[default]
    Idle,
    Listening,
    Resolved,
    Cancelled,
}

/// Progress toward the required number of targets.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Progress {
    acquired: usize,
    required: usize,
    label: String,
}

impl Progress {
    fn is_complete(&self) -> bool {
        self.acquired >= self.required
    }

    fn indicator(&self, pointer: Option<Point>) -> Indicator {
        Indicator::new(
            format!("{}/{} {}", self.acquired, self.required, self.label),
            pointer,
        )
    }
}

pub struct TargetSelectionController {
    overlay: Arc<dyn OverlaySurface>,
    tools: Arc<dyn ToolControls>,
    input: InputHub,
    state: watch::Sender<SelectionState>,
    active: AtomicBool,
}

impl TargetSelectionController {
    pub fn new(
        overlay: Arc<dyn OverlaySurface>,
        tools: Arc<dyn ToolControls>,
        input: InputHub,
    ) -> Self {
        let (state, _) = watch::channel(SelectionState::Idle);
        Self {
            overlay,
            tools,
            input,
            state,
            active: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> SelectionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.state.subscribe()
    }

    /// Waits for `required` targets of kind `label`.
    ///
    /// Returns `Ok(true)` when the threshold is met or Enter forces
    /// completion, `Ok(false)` on Escape or right-click. The previous tool
    /// and HUD visibility are restored on every exit path.
    pub async fn activate(&self, required: usize, label: &str) -> Result<bool> {
        let _latch = ActivationLatch::acquire(&self.active)?;
        let confirmed = self.run(required, label).await;
        self.transition(SelectionState::Idle);
        Ok(confirmed)
    }

    async fn run(&self, required: usize, label: &str) -> bool {
        let snapshot = self.tools.active_tool();
        self.tools.activate_targeting();
        self.tools.set_hud_hidden(true);

        let mut session =
            SessionGuard::open("target_selection", Arc::clone(&self.overlay), &self.input);
        let tools = Arc::clone(&self.tools);
        session.on_close(move || {
            tools.restore(&snapshot);
            tools.set_hud_hidden(false);
        });

        let mut progress = Progress {
            acquired: self.tools.target_count(),
            required,
            label: label.to_owned(),
        };
        let mut pointer = None;
        self.overlay.draw_indicator(&progress.indicator(pointer));
        self.transition(SelectionState::Listening);

        let confirmed = progress.is_complete() || loop {
            let Some(event) = session.next_event().await else {
                break false;
            };
            match event {
                InputEvent::TargetsChanged { count } => {
                    progress.acquired = count;
                    debug!(target: "board::targeting", acquired = count, required, "targets changed");
                    if progress.is_complete() {
                        break true;
                    }
                    self.overlay.draw_indicator(&progress.indicator(pointer));
                }
                InputEvent::PointerMove { position } => {
                    pointer = Some(position);
                    self.overlay.draw_indicator(&progress.indicator(pointer));
                }
                InputEvent::KeyDown { key: Key::Enter } => {
                    info!(
                        target: "board::targeting",
                        acquired = progress.acquired,
                        required,
                        "selection confirmed early"
                    );
                    break true;
                }
                InputEvent::KeyDown { key: Key::Escape } | InputEvent::ContextMenu { .. } => {
                    break false;
                }
                _ => {}
            }
        };

        self.transition(if confirmed {
            SelectionState::Resolved
        } else {
            SelectionState::Cancelled
        });
        info!(
            target: "board::targeting",
            confirmed,
            acquired = progress.acquired,
            "target selection finished"
        );
        confirmed
    }

    fn transition(&self, next: SelectionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            debug!(target: "board::targeting", from = %previous, to = %next, "state transition");
        }
    }
}
