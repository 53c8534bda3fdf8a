use serde::Deserialize;
use std::time::Duration;

use super::defaults::{DEFAULT_MAX_ROUNDS, DEFAULT_MODEL_TIMEOUT_SECS, DEFAULT_TOOL_TIMEOUT_SECS};

/// Budgets for a single agent run.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentConfig {
    /// Upper bound on reasoning steps per request
    pub max_rounds: usize,
    pub model_timeout_secs: u64,
    pub tool_timeout_secs: u64,
}

impl AgentConfig {
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            model_timeout_secs: DEFAULT_MODEL_TIMEOUT_SECS,
            tool_timeout_secs: DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }
}
