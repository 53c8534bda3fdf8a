use serde::Deserialize;

use super::defaults::DEFAULT_BIND;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RestServerConfig {
    pub bind: String,
    /// Allowed browser origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for RestServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            cors_origins: Vec::new(),
        }
    }
}
