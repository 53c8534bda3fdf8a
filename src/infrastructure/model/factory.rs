//! Provider factory - creates clients from config

use super::clients::{GeminiClient, OpenAIClient};
use super::traits::ModelProvider;
use crate::config::ModelProviderConfig;
use std::env;
use std::sync::Arc;
use tracing::warn;

/// Resolve an API key from its configured value.
///
/// `${VAR}` / `$VAR` forms are expanded; a bare value names the environment
/// variable holding the key.
pub fn resolve_api_key(provider: &str, configured: Option<&str>) -> Option<String> {
    let raw = configured.map(str::trim).filter(|raw| !raw.is_empty())?;

    if raw.contains('$') {
        return match shellexpand::env(raw) {
            Ok(value) if !value.trim().is_empty() => Some(value.into_owned()),
            Ok(_) => None,
            Err(err) => {
                warn!(provider, %err, "API key expansion failed");
                None
            }
        };
    }

    match env::var(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                provider,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Factory for creating model clients from provider config.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Creates a model client based on provider type.
    ///
    /// - `gemini`, `google` → Gemini format
    /// - Others → OpenAI-compatible format (default)
    pub fn create(config: &ModelProviderConfig) -> Arc<dyn ModelProvider> {
        if config.is_gemini() {
            Arc::new(GeminiClient::from_config(config))
        } else {
            Arc::new(OpenAIClient::from_config(config))
        }
    }
}
