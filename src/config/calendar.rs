use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_CALENDAR_ENDPOINT, DEFAULT_CALENDAR_ID, DEFAULT_SERVICE_ACCOUNT_ENV,
    DEFAULT_TIME_ZONE,
};

/// Target calendar and the credentials used to reach it.
///
/// The service-account key is read from `service_account_file` when set,
/// otherwise from the environment variable named by `service_account_env`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CalendarConfig {
    pub calendar_id: String,
    /// IANA zone attached to created events
    pub time_zone: String,
    pub service_account_env: String,
    pub service_account_file: Option<PathBuf>,
    pub endpoint: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            service_account_env: DEFAULT_SERVICE_ACCOUNT_ENV.to_string(),
            service_account_file: None,
            endpoint: DEFAULT_CALENDAR_ENDPOINT.to_string(),
        }
    }
}
