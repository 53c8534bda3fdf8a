//! Model traits

use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;

/// Trait for model provider implementations
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider id from configuration, used in logs and errors
    fn id(&self) -> &str;

    /// Send the conversation (and any tool declarations) to the model
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
