use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("calendar credentials unavailable: {reason}")]
    Credentials { reason: String },
    #[error("failed to obtain calendar access token: {reason}")]
    TokenExchange { reason: String },
    #[error("network error calling calendar API: {0}")]
    Network(#[from] reqwest::Error),
    #[error("calendar API responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("calendar API returned invalid response: {reason}")]
    InvalidResponse { reason: String },
    #[error("invalid calendar endpoint '{endpoint}'")]
    Url { endpoint: String },
}

impl CalendarError {
    pub fn credentials(reason: impl Into<String>) -> Self {
        Self::Credentials {
            reason: reason.into(),
        }
    }

    pub fn token_exchange(reason: impl Into<String>) -> Self {
        Self::TokenExchange {
            reason: reason.into(),
        }
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}
