//! Service-account OAuth for the calendar API
//!
//! A signed RS256 assertion is exchanged for a bearer token using the
//! `jwt-bearer` grant. Tokens are cached until shortly before expiry.

use std::env;
use std::fs;
use std::time::{Duration, Instant};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::CalendarError;
use crate::config::CalendarConfig;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// The fields of a service-account JSON key the token exchange needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub fn from_json(raw: &str) -> Result<Self, CalendarError> {
        serde_json::from_str(raw)
            .map_err(|e| CalendarError::credentials(format!("malformed service-account JSON: {e}")))
    }

    /// Read the key from `service_account_file` if set, otherwise from the
    /// environment variable named by `service_account_env`.
    pub fn load(config: &CalendarConfig) -> Result<Self, CalendarError> {
        let raw = match &config.service_account_file {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                CalendarError::credentials(format!("cannot read {}: {e}", path.display()))
            })?,
            None => env::var(&config.service_account_env).map_err(|_| {
                CalendarError::credentials(format!(
                    "{} environment variable not set",
                    config.service_account_env
                ))
            })?,
        };
        Self::from_json(&raw)
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Issues bearer tokens for one service account and scope.
pub struct TokenSource {
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    scope: String,
    http: Client,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    /// Fails early when the private key is not a valid RSA PEM.
    pub fn new(key: ServiceAccountKey, scope: impl Into<String>) -> Result<Self, CalendarError> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| CalendarError::credentials(format!("invalid private key: {e}")))?;
        Ok(Self {
            key,
            signing_key,
            scope: scope.into(),
            http: Client::new(),
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    pub async fn access_token(&self) -> Result<String, CalendarError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| Instant::now() < t.refresh_at) {
            return Ok(token.value.clone());
        }

        let assertion = self.sign_assertion()?;
        debug!(token_uri = self.key.token_uri.as_str(), "Exchanging service-account assertion");

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| CalendarError::token_exchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::token_exchange(format!("{status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CalendarError::token_exchange(format!("unreadable token response: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(REFRESH_MARGIN);
        info!(
            client_email = self.key.client_email.as_str(),
            expires_in = token.expires_in,
            "Obtained calendar access token"
        );
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    fn sign_assertion(&self) -> Result<String, CalendarError> {
        let iat = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: &self.scope,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
            .map_err(|e| CalendarError::credentials(format!("failed to sign assertion: {e}")))
    }
}
