//! Program configuration
//!
//! One JSON document with an `engine` and a `session` section. Every
//! field is optional; missing ones take the built-in defaults.
//!
//! ```json
//! {
//!   "engine": { "max_depth": 4, "time_budget_ms": 1500, "cutoff": "window" },
//!   "session": { "team": "smartteam", "dir": "/tmp/referee", "claim_policy": "reject" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::error::{Error, Result};
use crate::rules::ClaimPolicy;

pub const DEFAULT_TEAM: &str = "smartteam";
pub const DEFAULT_POLL_MS: u64 = 300;

/// How the session talks to the referee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name used for our signal files and move lines
    pub team: String,
    /// Directory shared with the referee
    pub dir: PathBuf,
    pub poll_interval_ms: u64,
    /// What to do with an opponent move on an owned edge
    pub claim_policy: ClaimPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            team: DEFAULT_TEAM.to_string(),
            dir: PathBuf::from("."),
            poll_interval_ms: DEFAULT_POLL_MS,
            claim_policy: ClaimPolicy::default(),
        }
    }
}

impl SessionConfig {
    #[inline]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub session: SessionConfig,
}

impl Config {
    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("read config {}", path.display()), e))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
