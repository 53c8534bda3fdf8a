//! # Provider Configuration
//!
//! Connection settings for the language model backing the agent.
//!
//! | Type | Description | API Key Required |
//! |------|-------------|-----------------|
//! | `gemini` | Google Gemini API | Yes |
//! | `openai` | OpenAI-compatible APIs | Yes |

use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_GEMINI_API_KEY_ENV, DEFAULT_GEMINI_ENDPOINT, DEFAULT_PROVIDER_ID};

/// Configuration for a model provider.
///
/// # Example
///
/// ```toml
/// [[providers]]
/// id = "gemini"
/// type = "gemini"
/// endpoint = "https://generativelanguage.googleapis.com"
/// api_key = "GEMINI_API_KEY"
/// ```
///
/// `api_key` names the environment variable holding the key; `${VAR}` syntax
/// is expanded as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelProviderConfig {
    pub id: String,
    /// Determines the wire format: "gemini" or "openai"
    #[serde(rename = "type")]
    pub provider_type: String,
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API path override (e.g., "v1beta/models" for Gemini)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawProviderConfig {
    pub(super) id: String,
    #[serde(rename = "type", default)]
    pub(super) provider_type: String,
    pub(super) endpoint: Option<String>,
    pub(super) api_key: Option<String>,
    #[serde(default)]
    pub(super) api_path: Option<String>,
}

impl From<RawProviderConfig> for ModelProviderConfig {
    fn from(raw: RawProviderConfig) -> Self {
        Self {
            id: raw.id,
            provider_type: raw.provider_type,
            endpoint: raw.endpoint.unwrap_or_default(),
            api_key: raw.api_key,
            api_path: raw.api_path,
        }
    }
}

impl ModelProviderConfig {
    /// Built-in Gemini provider used when no configuration file exists.
    pub fn gemini_default() -> Self {
        Self {
            id: DEFAULT_PROVIDER_ID.to_string(),
            provider_type: "gemini".to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_key: Some(DEFAULT_GEMINI_API_KEY_ENV.to_string()),
            api_path: None,
        }
    }

    pub fn is_gemini(&self) -> bool {
        self.provider_type.eq_ignore_ascii_case("gemini")
            || self.provider_type.eq_ignore_ascii_case("google")
    }
}
