use super::agent::AgentConfig;
use super::calendar::CalendarConfig;
use super::defaults::{DEFAULT_MODEL, DEFAULT_PROVIDER_ID, DEFAULT_TEMPERATURE};
use super::error::ConfigError;
use super::provider::ModelProviderConfig;
use super::server::RestServerConfig;
use std::path::Path;

/// Application configuration loaded from agent.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_provider: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub system_prompt: Option<String>,
    pub providers: Vec<ModelProviderConfig>,
    pub calendar: CalendarConfig,
    pub agent: AgentConfig,
    pub server: RestServerConfig,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Provider entry selected by `default_provider`
    pub fn active_provider(&self) -> Result<&ModelProviderConfig, ConfigError> {
        self.providers
            .iter()
            .find(|p| p.id == self.default_provider)
            .ok_or_else(|| ConfigError::ProviderNotFound {
                provider: self.default_provider.clone(),
            })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: DEFAULT_PROVIDER_ID.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            system_prompt: None,
            providers: vec![ModelProviderConfig::gemini_default()],
            calendar: CalendarConfig::default(),
            agent: AgentConfig::default(),
            server: RestServerConfig::default(),
        }
    }
}
