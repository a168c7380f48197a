//! Session settings, read from TOML.
//!
//! ```toml
//! clock_secs = 300
//! promotion_timeout_secs = 7
//! coach = true
//! export_path = "game.pgn"
//!
//! [ai]
//! white = false
//! black = true
//! tier = 3
//! engine_path = "/usr/bin/stockfish"
//! movetime_ms = 500
//! timeout_ms = 2000
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uci_engine::{ExternalEngine, Tier};

use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Starting time per side, in seconds
    pub clock_secs: f64,
    /// How long a promotion choice may stay open before a queen is chosen
    pub promotion_timeout_secs: f64,
    pub coach: bool,
    pub export_path: PathBuf,
    pub ai: AiConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clock_secs: 300.0,
            promotion_timeout_secs: 7.0,
            coach: true,
            export_path: PathBuf::from("game.pgn"),
            ai: AiConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn promotion_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.promotion_timeout_secs.max(0.0))
    }
}

/// Which sides the computer plays and how strongly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    pub white: bool,
    pub black: bool,
    pub tier: Tier,
    /// External UCI engine, used only at the strongest tier
    pub engine_path: Option<PathBuf>,
    pub movetime_ms: u64,
    pub timeout_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            white: false,
            black: false,
            tier: Tier::default(),
            engine_path: None,
            movetime_ms: uci_engine::DEFAULT_MOVETIME.as_millis() as u64,
            timeout_ms: uci_engine::DEFAULT_REPLY_TIMEOUT.as_millis() as u64,
        }
    }
}

impl AiConfig {
    pub fn plays(&self, side: chess_core::Color) -> bool {
        match side {
            chess_core::Color::White => self.white,
            chess_core::Color::Black => self.black,
        }
    }

    /// True when an engine path is set and the tier is the strongest.
    pub fn uses_external(&self) -> bool {
        self.engine_path.is_some() && self.tier == Tier::MAX
    }

    /// The external engine to consult, if [`Self::uses_external`].
    pub fn external_engine(&self) -> Option<ExternalEngine> {
        if !self.uses_external() {
            return None;
        }
        let path = self.engine_path.clone()?;
        Some(
            ExternalEngine::new(path)
                .with_movetime(Duration::from_millis(self.movetime_ms))
                .with_reply_timeout(Duration::from_millis(self.timeout_ms)),
        )
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
