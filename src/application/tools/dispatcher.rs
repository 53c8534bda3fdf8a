use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{info, warn};

use super::catalog::{CalendarTool, ToolKind, declarations};
use crate::application::calendar::{CalendarClient, ToolResult};
use crate::model::ToolDeclaration;
use crate::types::{Message, ToolCallRequest};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown tool {0}")]
    UnknownTool(String),
    #[error("{tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{tool}: timed out after {secs}s")]
    Timeout { tool: &'static str, secs: f64 },
}

/// Outcome of one dispatched call, still tied to the request that caused it.
#[derive(Debug, Clone)]
pub struct ToolExecution {
    pub call_id: String,
    pub tool: String,
    pub arguments: Value,
    pub result: ToolResult,
}

impl ToolExecution {
    /// The tool-result message answering the originating call.
    pub fn into_message(self) -> Message {
        Message::tool(self.call_id, self.tool, self.result.to_string())
    }
}

/// Routes model-issued tool calls to the calendar client.
#[derive(Clone)]
pub struct ToolDispatcher {
    calendar: CalendarClient,
    tool_timeout: Duration,
}

impl ToolDispatcher {
    pub fn new(calendar: CalendarClient, tool_timeout: Duration) -> Self {
        Self {
            calendar,
            tool_timeout,
        }
    }

    pub fn calendar_id(&self) -> &str {
        self.calendar.calendar_id()
    }

    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        declarations()
    }

    /// Always yields exactly one execution; failures are carried in-band.
    pub async fn dispatch(&self, call: &ToolCallRequest) -> ToolExecution {
        let result = match self.try_dispatch(call).await {
            Ok(result) => result,
            Err(err) => {
                warn!(tool = call.name.as_str(), call_id = call.id.as_str(), error = %err, "Tool dispatch failed");
                ToolResult::error(err.to_string())
            }
        };

        info!(
            tool = call.name.as_str(),
            call_id = call.id.as_str(),
            status = ?result.status(),
            "Tool executed"
        );

        ToolExecution {
            call_id: call.id.clone(),
            tool: call.name.clone(),
            arguments: call.arguments.clone(),
            result,
        }
    }

    async fn try_dispatch(&self, call: &ToolCallRequest) -> Result<ToolResult, DispatchError> {
        let kind = ToolKind::from_name(&call.name)
            .ok_or_else(|| DispatchError::UnknownTool(call.name.clone()))?;
        let tool = CalendarTool::decode(kind, &call.arguments).map_err(|source| {
            DispatchError::InvalidArguments {
                tool: kind.name(),
                source,
            }
        })?;

        timeout(self.tool_timeout, tool.execute(&self.calendar))
            .await
            .map_err(|_| DispatchError::Timeout {
                tool: kind.name(),
                secs: self.tool_timeout.as_secs_f64(),
            })
    }
}
