use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::application::tools::ToolExecution;
use crate::config::AppConfig;
use crate::config::defaults::{
    DEFAULT_MAX_ROUNDS, DEFAULT_MODEL, DEFAULT_MODEL_TIMEOUT_SECS, DEFAULT_TEMPERATURE,
};
use crate::types::ToolCallRequest;

/// Where the loop stands between two transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentPhase {
    Reasoning,
    /// Calls from the most recent assistant message, in the order issued.
    Acting(Vec<ToolCallRequest>),
    Terminated,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentStep {
    pub call_id: String,
    pub tool: String,
    pub input: Value,
    pub success: bool,
    pub output: Value,
}

impl From<&ToolExecution> for AgentStep {
    fn from(execution: &ToolExecution) -> Self {
        Self {
            call_id: execution.call_id.clone(),
            tool: execution.tool.clone(),
            input: execution.arguments.clone(),
            success: !execution.result.is_error(),
            output: execution.result.to_value(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    /// Raw terminal content handed to presentation.
    pub content: String,
    pub rounds: usize,
    pub steps: Vec<AgentStep>,
}

#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_rounds: usize,
    pub model_timeout: Duration,
}

impl AgentOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_rounds: config.agent.max_rounds,
            model_timeout: config.agent.model_timeout(),
        }
    }
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_rounds: DEFAULT_MAX_ROUNDS,
            model_timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
        }
    }
}
