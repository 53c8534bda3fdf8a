//! Model types - Request, Response, and Error types

use crate::types::{Message, ToolCallRequest};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// A function the model may call, with its JSON argument schema
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Model request for LLM chat
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDeclaration>,
    pub temperature: Option<f32>,
}

/// Model response from LLM; always an assistant message
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub message: Message,
}

impl ModelResponse {
    pub fn new(content: impl Into<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
        Self {
            message: Message::assistant_with_calls(content, tool_calls),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(content, Vec::new())
    }
}

/// Model errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider '{provider}' requires an API key")]
    MissingApiKey { provider: String },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' responded with {status}: {body}")]
    Status {
        provider: String,
        status: StatusCode,
        body: String,
    },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    pub fn status(provider: impl Into<String>, status: StatusCode, body: impl Into<String>) -> Self {
        Self::Status {
            provider: provider.into(),
            status,
            body: body.into(),
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}
