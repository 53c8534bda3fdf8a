pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, assistant, stdio, tools};
pub use cli::{Cli, RunMode};
pub use config::AppConfig;
pub use domain::types;
pub use infrastructure::{calendar, model, server};

use application::assistant::SchedulingAssistant;
use application::calendar::CalendarClient;
use application::tools::ToolDispatcher;
use constants::CALENDAR_SCOPE;
use infrastructure::calendar::{GoogleCalendarProvider, ServiceAccountKey, TokenSource};
use model::ProviderFactory;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing(cli.mode);
    info!("Starting calendar-agent");
    debug!(mode = ?cli.mode, config = ?cli.config, "CLI arguments parsed");

    let config = AppConfig::load(cli.config.as_deref())?;
    match &cli.config {
        Some(path) => info!(path = %path.display(), "Loaded configuration from file"),
        None => info!("Loaded configuration from default path"),
    }

    let assistant = Arc::new(build_assistant(&config)?);
    let rest_addr = match cli.rest_addr {
        Some(addr) => addr,
        None => server::parse_addr(&config.server.bind)?,
    };

    info!(mode = ?cli.mode, "Running agent in selected mode");
    match cli.mode {
        RunMode::Stdio => {
            stdio::run(assistant).await?;
        }
        RunMode::Rest => {
            server::serve(assistant, &config.server, rest_addr).await?;
        }
        RunMode::All => {
            let rest_assistant = assistant.clone();
            let server_config = config.server.clone();
            let rest_handle = tokio::spawn(async move {
                if let Err(e) = server::serve(rest_assistant, &server_config, rest_addr).await {
                    tracing::error!(error = %e, "REST server error");
                }
            });

            let stdio_result = stdio::run(assistant).await;
            rest_handle.abort();
            stdio_result?;
        }
    }
    info!("Agent execution finished");
    Ok(())
}

/// Wire the model provider, calendar collaborator and pipeline from config.
///
/// Missing or invalid calendar credentials abort startup here.
pub fn build_assistant(config: &AppConfig) -> Result<SchedulingAssistant, Box<dyn Error>> {
    let provider_config = config.active_provider()?;
    debug!(
        provider = provider_config.id.as_str(),
        provider_type = provider_config.provider_type.as_str(),
        "Initializing model provider"
    );
    let model = ProviderFactory::create(provider_config);

    let key = ServiceAccountKey::load(&config.calendar)?;
    info!(
        client_email = key.client_email.as_str(),
        calendar_id = config.calendar.calendar_id.as_str(),
        "Initializing calendar client"
    );
    let tokens = TokenSource::new(key, CALENDAR_SCOPE)?;
    let calendar = GoogleCalendarProvider::new(
        &config.calendar.endpoint,
        config.calendar.time_zone.clone(),
        tokens,
    )?;

    let client = CalendarClient::new(Arc::new(calendar), config.calendar.calendar_id.clone());
    let dispatcher = ToolDispatcher::new(client, config.agent.tool_timeout());
    Ok(SchedulingAssistant::from_config(config, model, dispatcher))
}

/// STDIO output is protocol traffic, so logs go to stderr in those modes.
fn init_tracing(mode: RunMode) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let builder = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true);
        match mode {
            RunMode::Stdio | RunMode::All => builder.with_writer(std::io::stderr).init(),
            RunMode::Rest => builder.init(),
        }
    });
}
