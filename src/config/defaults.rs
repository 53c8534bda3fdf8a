pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_PROVIDER_ID: &str = "gemini";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_TIME_ZONE: &str = "Asia/Kolkata";
pub const DEFAULT_SERVICE_ACCOUNT_ENV: &str = "GOOGLE_CALENDAR_SERVICE_ACCOUNT_JSON";
pub const DEFAULT_CALENDAR_ENDPOINT: &str = "https://www.googleapis.com/calendar/v3";

pub const DEFAULT_MAX_ROUNDS: usize = 8;
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
