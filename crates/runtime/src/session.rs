//! Scoped ownership of everything a live session touches.
//!
//! A [`SessionGuard`] attaches the input listener and grabs input
//! passthrough when opened; dropping it reverses all of that. Sessions end
//! by dropping the guard on every path, including cancellation of the
//! owning future.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::api::{InteractionError, OverlaySurface};
use crate::input::{InputEvent, InputHub, InputSubscription};

type Teardown = Box<dyn FnOnce() + Send>;

pub(crate) struct SessionGuard {
    kind: &'static str,
    overlay: Arc<dyn OverlaySurface>,
    input: Option<InputSubscription>,
    teardown: Vec<Teardown>,
}

impl SessionGuard {
    pub(crate) fn open(kind: &'static str, overlay: Arc<dyn OverlaySurface>, hub: &InputHub) -> Self {
        overlay.set_input_passthrough(true);
        let input = hub.attach();
        debug!(target: "board::session", kind, "session opened");

        Self {
            kind,
            overlay,
            input: Some(input),
            teardown: Vec::new(),
        }
    }

    /// Registers extra cleanup to run when the session closes.
    pub(crate) fn on_close(&mut self, action: impl FnOnce() + Send + 'static) {
        self.teardown.push(Box::new(action));
    }

    pub(crate) async fn next_event(&mut self) -> Option<InputEvent> {
        match self.input.as_mut() {
            Some(input) => input.next().await,
            None => None,
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.input.take();
        self.overlay.clear();
        self.overlay.set_input_passthrough(false);
        for action in self.teardown.drain(..).rev() {
            action();
        }
        debug!(target: "board::session", kind = self.kind, "session closed");
    }
}

/// Rejects overlapping activations on one controller.
pub(crate) struct ActivationLatch<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ActivationLatch<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, InteractionError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self { flag })
            .map_err(|_| InteractionError::SessionActive)
    }
}

impl Drop for ActivationLatch<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RecordingOverlay;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn drop_restores_everything() {
        let overlay = Arc::new(RecordingOverlay::new());
        let hub = InputHub::new();
        let closed = Arc::new(AtomicUsize::new(0));

        let mut guard = SessionGuard::open("test", overlay.clone(), &hub);
        let counter = Arc::clone(&closed);
        guard.on_close(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(overlay.passthrough());
        assert_eq!(hub.listener_count(), 1);

        drop(guard);

        assert!(!overlay.passthrough());
        assert!(overlay.is_clear());
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn latch_rejects_second_holder() {
        let flag = AtomicBool::new(false);
        let first = ActivationLatch::acquire(&flag).unwrap();
        assert!(matches!(
            ActivationLatch::acquire(&flag),
            Err(InteractionError::SessionActive)
        ));
        drop(first);
        assert!(ActivationLatch::acquire(&flag).is_ok());
    }
}
