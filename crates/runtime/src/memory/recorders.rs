use std::sync::Mutex;

use board_core::{Highlight, Point};

use super::lock;
use crate::api::{
    ForwardError, ForwardMessage, Indicator, NoticeLevel, Notifier, OverlaySurface, PeerChannel,
    ToolControls, ToolSnapshot,
};

#[derive(Default)]
struct OverlayLog {
    highlight: Option<Highlight>,
    indicator: Option<Indicator>,
    highlights_drawn: usize,
    indicators: Vec<Indicator>,
    clears: usize,
    pans: Vec<Point>,
    passthrough: bool,
}

/// Overlay that remembers what is currently drawn and what was drawn before.
#[derive(Default)]
pub struct RecordingOverlay {
    log: Mutex<OverlayLog>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight(&self) -> Option<Highlight> {
        lock(&self.log).highlight.clone()
    }

    pub fn indicator(&self) -> Option<Indicator> {
        lock(&self.log).indicator.clone()
    }

    pub fn indicator_history(&self) -> Vec<Indicator> {
        lock(&self.log).indicators.clone()
    }

    pub fn highlights_drawn(&self) -> usize {
        lock(&self.log).highlights_drawn
    }

    pub fn clears(&self) -> usize {
        lock(&self.log).clears
    }

    pub fn pans(&self) -> Vec<Point> {
        lock(&self.log).pans.clone()
    }

    pub fn passthrough(&self) -> bool {
        lock(&self.log).passthrough
    }

    /// Nothing is drawn right now.
    pub fn is_clear(&self) -> bool {
        let log = lock(&self.log);
        log.highlight.is_none() && log.indicator.is_none()
    }
}

impl OverlaySurface for RecordingOverlay {
    fn draw_highlight(&self, highlight: &Highlight) {
        let mut log = lock(&self.log);
        log.highlight = Some(highlight.clone());
        log.highlights_drawn += 1;
    }

    fn draw_indicator(&self, indicator: &Indicator) {
        let mut log = lock(&self.log);
        log.indicator = Some(indicator.clone());
        log.indicators.push(indicator.clone());
    }

    fn clear(&self) {
        let mut log = lock(&self.log);
        log.highlight = None;
        log.indicator = None;
        log.clears += 1;
    }

    fn edge_pan(&self, position: Point) {
        lock(&self.log).pans.push(position);
    }

    fn set_input_passthrough(&self, enabled: bool) {
        lock(&self.log).passthrough = enabled;
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        lock(&self.notices).clone()
    }

    pub fn count(&self, level: NoticeLevel) -> usize {
        lock(&self.notices)
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        lock(&self.notices).push((level, message.to_owned()));
    }
}

/// Peer socket that keeps every emitted payload as JSON.
#[derive(Default)]
pub struct RecordingPeer {
    payloads: Mutex<Vec<String>>,
    failure: Mutex<Option<ForwardError>>,
}

impl RecordingPeer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, error: ForwardError) {
        *lock(&self.failure) = Some(error);
    }

    pub fn payloads(&self) -> Vec<String> {
        lock(&self.payloads).clone()
    }

    pub fn messages(&self) -> Vec<ForwardMessage> {
        lock(&self.payloads)
            .iter()
            .filter_map(|payload| ForwardMessage::from_json(payload).ok())
            .collect()
    }
}

impl PeerChannel for RecordingPeer {
    fn emit(&self, message: &ForwardMessage) -> Result<(), ForwardError> {
        if let Some(error) = lock(&self.failure).clone() {
            return Err(error);
        }
        let payload = message
            .to_json()
            .map_err(|e| ForwardError::Transport(e.to_string()))?;
        lock(&self.payloads).push(payload);
        Ok(())
    }
}

struct ToolState {
    active: ToolSnapshot,
    hud_hidden: bool,
    targets: usize,
}

/// Toolbar stand-in starting on the token selection tool.
pub struct MemoryTools {
    state: Mutex<ToolState>,
}

impl MemoryTools {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ToolState {
                active: ToolSnapshot::new("token", "select"),
                hud_hidden: false,
                targets: 0,
            }),
        }
    }

    pub fn set_target_count(&self, count: usize) {
        lock(&self.state).targets = count;
    }

    pub fn hud_hidden(&self) -> bool {
        lock(&self.state).hud_hidden
    }
}

impl Default for MemoryTools {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolControls for MemoryTools {
    fn active_tool(&self) -> ToolSnapshot {
        lock(&self.state).active.clone()
    }

    fn activate_targeting(&self) {
        lock(&self.state).active = ToolSnapshot::new("token", "target");
    }

    fn restore(&self, snapshot: &ToolSnapshot) {
        lock(&self.state).active = snapshot.clone();
    }

    fn set_hud_hidden(&self, hidden: bool) {
        lock(&self.state).hud_hidden = hidden;
    }

    fn target_count(&self) -> usize {
        lock(&self.state).targets
    }
}
