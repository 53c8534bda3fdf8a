use super::agent::AgentConfig;
use super::app::AppConfig;
use super::calendar::CalendarConfig;
use super::defaults::{DEFAULT_MODEL, DEFAULT_PROVIDER_ID};
use super::error::ConfigError;
use super::provider::{ModelProviderConfig, RawProviderConfig};
use super::server::RestServerConfig;
use crate::constants::{CALENDAR_ID_ENV, CONFIG_PATH, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::{debug, info};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    pub model: Option<String>,
    pub default_provider: Option<String>,
    pub temperature: Option<f32>,
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub providers: Vec<RawProviderConfig>,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub server: RestServerConfig,
}

/// Ensures environment variables are loaded from config/.env and ./.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
        let _ = dotenvy::dotenv();
    });
}

/// Load and validate configuration.
///
/// An explicit path must exist. Without one, `config/agent.toml` is used when
/// present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let config = match path {
        Some(path) => read_config(path)?,
        None => {
            let default_path = Path::new(CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path)?
            } else {
                info!(path = CONFIG_PATH, "No configuration file found, using defaults");
                AppConfig::default()
            }
        }
    };
    let config = apply_env_overrides(config);
    validate(&config)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading agent configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    build(parsed)
}

fn build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    let mut providers = Vec::with_capacity(parsed.providers.len());
    for raw_provider in parsed.providers {
        if raw_provider
            .endpoint
            .as_deref()
            .is_none_or(|endpoint| endpoint.trim().is_empty())
        {
            return Err(ConfigError::MissingEndpoint {
                provider: raw_provider.id.clone(),
            });
        }
        providers.push(ModelProviderConfig::from(raw_provider));
    }

    Ok(AppConfig {
        default_provider: parsed
            .default_provider
            .unwrap_or_else(|| DEFAULT_PROVIDER_ID.to_string()),
        model: parsed.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        temperature: parsed.temperature,
        system_prompt: parsed.system_prompt,
        providers,
        calendar: parsed.calendar,
        agent: parsed.agent,
        server: parsed.server,
    })
}

fn apply_env_overrides(mut config: AppConfig) -> AppConfig {
    if let Ok(calendar_id) = env::var(CALENDAR_ID_ENV) {
        let calendar_id = calendar_id.trim();
        if !calendar_id.is_empty() {
            debug!(calendar_id, "Calendar id overridden from environment");
            config.calendar.calendar_id = calendar_id.to_string();
        }
    }
    config
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.providers.is_empty() {
        return Err(ConfigError::NoProvidersConfigured);
    }
    config.active_provider()?;
    if config.agent.max_rounds == 0 {
        return Err(ConfigError::ZeroRoundBudget);
    }
    Ok(())
}
