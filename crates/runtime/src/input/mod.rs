//! Fan-out of board input events to active sessions.
//!
//! The host feeds raw pointer/keyboard events into [`InputHub::dispatch`];
//! sessions hold an [`InputSubscription`] for as long as they listen.
//! Dropping the subscription detaches it, so no listener outlives its session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use board_core::Point;
use tokio::sync::mpsc;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum Key {
    Escape,
    Enter,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton, position: Point },
    PointerMove { position: Point },
    /// Right-click request for the host's context menu.
    ContextMenu { position: Point },
    KeyDown { key: Key },
    /// The host's acquired-target set changed.
    TargetsChanged { count: usize },
}

impl InputEvent {
    pub fn primary_click(position: Point) -> Self {
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            position,
        }
    }

    pub fn key(key: Key) -> Self {
        InputEvent::KeyDown { key }
    }
}

/// What happened to a dispatched event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub delivered: usize,
    /// The host must suppress its default handling (context menu).
    pub prevent_default: bool,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    senders: Vec<(u64, mpsc::UnboundedSender<InputEvent>)>,
}

/// Cloneable handle to the shared listener table.
#[derive(Clone, Default)]
pub struct InputHub {
    listeners: Arc<Mutex<Listeners>>,
}

impl InputHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self) -> InputSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.senders.push((id, tx));

        InputSubscription {
            id,
            listeners: Arc::clone(&self.listeners),
            events: rx,
        }
    }

    pub fn dispatch(&self, event: InputEvent) -> DispatchOutcome {
        let mut listeners = lock(&self.listeners);
        listeners.senders.retain(|(_, tx)| !tx.is_closed());

        let delivered = listeners
            .senders
            .iter()
            .filter(|(_, tx)| tx.send(event).is_ok())
            .count();

        trace!(target: "board::input", ?event, delivered, "dispatched input");

        DispatchOutcome {
            delivered,
            prevent_default: delivered > 0 && matches!(event, InputEvent::ContextMenu { .. }),
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).senders.len()
    }
}

/// Receiving end of an attached listener.
pub struct InputSubscription {
    id: u64,
    listeners: Arc<Mutex<Listeners>>,
    events: mpsc::UnboundedReceiver<InputEvent>,
}

impl InputSubscription {
    pub async fn next(&mut self) -> Option<InputEvent> {
        self.events.recv().await
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        lock(&self.listeners)
            .senders
            .retain(|(id, _)| *id != self.id);
    }
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}
