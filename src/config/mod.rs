pub mod agent;
pub mod app;
pub mod calendar;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod provider;
pub mod server;

pub use agent::AgentConfig;
pub use app::AppConfig;
pub use calendar::CalendarConfig;
pub use error::ConfigError;
pub use provider::ModelProviderConfig;
pub use server::RestServerConfig;
