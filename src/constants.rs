//! Application constants
//!
//! Single source of truth for paths and other constants.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/agent.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Environment variable overriding the configured calendar id
pub const CALENDAR_ID_ENV: &str = "CALENDAR_ID";

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

/// Default OpenAI-compatible chat completions path
pub const DEFAULT_OPENAI_API_PATH: &str = "v1/chat/completions";

/// OAuth scope granting calendar read/write
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Reply sent when the chat pipeline fails as a whole
pub const APOLOGY_MESSAGE: &str =
    "An error occurred while processing your request. Please try again.";

/// Raw result used when a run produced neither text nor tool output
pub const NO_RESPONSE_FALLBACK: &str = "No response generated.";
