//! Rewrites the loop's raw result into a reply for the end user.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::agent::{AgentError, AgentOptions};
use crate::model::{ModelProvider, ModelRequest};
use crate::types::Message;

pub const PRESENTATION_PROMPT: &str = "Show the provided data in more general and understandable form with covering each content from the data if htmlLink are present show them also don't provide observations and understanding headings or quotes";

/// One extra model call, without tools, that rephrases raw content.
pub struct Presenter {
    model: Arc<dyn ModelProvider>,
    model_name: String,
    temperature: Option<f32>,
    timeout: Duration,
}

impl Presenter {
    pub fn new(model: Arc<dyn ModelProvider>, options: &AgentOptions) -> Self {
        Self {
            model,
            model_name: options.model.clone(),
            temperature: options.temperature,
            timeout: options.model_timeout,
        }
    }

    pub async fn present(&self, raw: &str) -> Result<String, AgentError> {
        let request = ModelRequest {
            model: self.model_name.clone(),
            messages: vec![Message::user(format!("{PRESENTATION_PROMPT}:\n{raw}"))],
            tools: Vec::new(),
            temperature: self.temperature,
        };
        debug!(raw_len = raw.len(), "Requesting presentation rewrite");

        let response = timeout(self.timeout, self.model.chat(request))
            .await
            .map_err(|_| {
                AgentError::Presentation(Box::new(AgentError::ModelTimeout {
                    secs: self.timeout.as_secs_f64(),
                }))
            })?
            .map_err(|err| AgentError::Presentation(Box::new(AgentError::Model(err))))?;

        let text = response.message.content();
        if text.trim().is_empty() {
            warn!("Presentation returned no text, replying with raw content");
            return Ok(raw.to_string());
        }
        Ok(text.to_string())
    }
}
