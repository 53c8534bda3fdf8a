//! Gemini client implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::base::HttpClientBase;
use crate::config::ModelProviderConfig;
use crate::constants::DEFAULT_GEMINI_API_PATH;
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::factory::resolve_api_key;
use crate::infrastructure::model::traits::ModelProvider;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};
use crate::types::ToolCallRequest;

/// Gemini client for Google AI
#[derive(Clone)]
pub struct GeminiClient {
    base: HttpClientBase,
    api_path: String,
}

impl GeminiClient {
    pub fn from_config(config: &ModelProviderConfig) -> Self {
        let api_key = resolve_api_key(&config.id, config.api_key.as_deref());
        Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), api_key),
            api_path: config
                .api_path
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_API_PATH.to_string()),
        }
    }

    fn build_model_url(&self, model: &str) -> String {
        let base = self.base.endpoint.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        format!("{base}/{path}/{model}:generateContent")
    }

    fn build_payload(request: &ModelRequest) -> Value {
        let (system_text, contents) = MessageAdapter::to_gemini_format(&request.messages);

        let mut payload = json!({ "contents": contents });

        if let Some(system) = system_text {
            payload["system_instruction"] = json!({
                "parts": [{"text": system}]
            });
        }
        if !request.tools.is_empty() {
            payload["tools"] = MessageAdapter::to_gemini_tools(&request.tools);
        }
        if let Some(temperature) = request.temperature {
            payload["generationConfig"] = json!({ "temperature": temperature });
        }
        payload
    }

    fn parse_response(&self, response: GeminiResponse) -> Result<ModelResponse, ModelError> {
        let candidate = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing candidates"))?;

        let Some(content) = candidate.content else {
            warn!(
                provider = self.base.id.as_str(),
                finish_reason = candidate.finish_reason.as_deref(),
                "Gemini candidate carried no content"
            );
            return Ok(ModelResponse::text(String::new()));
        };

        let mut text = String::new();
        let mut tool_calls = Vec::new();
        for part in content.parts {
            if let Some(fragment) = part.text {
                text.push_str(&fragment);
            }
            if let Some(call) = part.function_call {
                // Gemini issues no call ids; mint one so results stay correlated.
                let id = format!("{}_{}", call.name, Uuid::new_v4().simple());
                tool_calls.push(ToolCallRequest::new(id, call.name, call.args));
            }
        }

        Ok(ModelResponse::new(text, tool_calls))
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.build_model_url(&request.model);
        let payload = Self::build_payload(&request);

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to Gemini"
        );

        let response: GeminiResponse = self.base.post_with_query_key(&url, &payload).await?;
        let response = self.parse_response(response)?;
        debug!(
            tool_calls = response.message.tool_calls().len(),
            "Received response from Gemini"
        );
        Ok(response)
    }
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Deserialize)]
struct GeminiFunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}
