//! Runtime configuration and environment loading.

use std::env;

use board_core::BoardConfig;

/// Settings shared by the interaction controllers and the executor.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub board: BoardConfig,
    /// Whether committed moves ask the host to animate.
    pub animate: bool,
    /// Whether continuous-board sessions draw a hint next to the region.
    pub show_input_indicator: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            animate: true,
            show_input_indicator: true,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BOARD_TOLERANCE_FRACTION` - Slack around continuous regions, in grid units (default: 0.25)
    /// - `BOARD_REACHABLE_RAYS` - Rays cast for the reachable polygon (default: 120)
    /// - `BOARD_ANIMATE` - Animate committed moves (default: true)
    /// - `BOARD_SHOW_INDICATOR` - Draw the continuous input hint (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads keys through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(fraction) = parse::<f64>(lookup("BOARD_TOLERANCE_FRACTION")) {
            config.board = config.board.with_tolerance_fraction(fraction);
        }
        if let Some(rays) = parse::<usize>(lookup("BOARD_REACHABLE_RAYS")) {
            config.board = config.board.with_reachable_rays(rays);
        }
        if let Some(animate) = parse_bool(lookup("BOARD_ANIMATE")) {
            config.animate = animate;
        }
        if let Some(show) = parse_bool(lookup("BOARD_SHOW_INDICATOR")) {
            config.show_input_indicator = show;
        }

        config
    }

    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

fn parse_bool(value: Option<String>) -> Option<bool> {
    match value?.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
