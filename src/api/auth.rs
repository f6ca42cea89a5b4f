//! OAuth token acquisition and caching.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::api::types::TokenResponse;
use crate::error::{Error, Result};

/// How long an issued token stays usable.
pub const TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Grant type requesting public access without a user credential.
const INSTALLED_CLIENT_GRANT: &str = "https://oauth.reddit.com/grants/installed_client";

/// Device identifier sent with the public grant.
const DEVICE_ID: &str = "DO_NOT_TRACK_THIS_DEVICE";

/// One cached bearer value plus its issue time.
#[derive(Debug, Clone)]
struct CachedToken {
    header_value: String,
    issued: Instant,
}

/// Obtains and caches bearer tokens, keyed by refresh credential.
///
/// The key includes the "no refresh token" case, so public and private
/// grants never shadow each other. Entries expire after [`TOKEN_TTL`];
/// a fresh exchange happens only on cache miss or expiry.
#[derive(Debug)]
pub struct TokenManager {
    client_id: String,
    refresh_token: Option<String>,
    auth_base: String,
    cache: Mutex<HashMap<Option<String>, CachedToken>>,
}

impl TokenManager {
    pub fn new(client_id: String, refresh_token: Option<String>, auth_base: String) -> Self {
        Self {
            client_id,
            refresh_token,
            auth_base,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Redirect the token exchange at a different origin (test servers).
    pub(crate) fn set_auth_base(&mut self, auth_base: String) {
        self.auth_base = auth_base;
    }

    /// Returns a ready-to-send `Authorization` header value.
    ///
    /// The cache mutex stays held across the exchange, so concurrent
    /// callers cannot trigger duplicate token requests.
    pub async fn authenticate(&self, http: &reqwest::Client) -> Result<String> {
        let key = self.refresh_token.clone();
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.get(&key) {
            if cached.issued.elapsed() < TOKEN_TTL {
                return Ok(cached.header_value.clone());
            }
        }

        let header_value = self.exchange(http).await?;
        cache.insert(
            key,
            CachedToken {
                header_value: header_value.clone(),
                issued: Instant::now(),
            },
        );
        Ok(header_value)
    }

    async fn exchange(&self, http: &reqwest::Client) -> Result<String> {
        let form: Vec<(&str, &str)> = match &self.refresh_token {
            Some(token) => {
                tracing::info!("refreshing private access token");
                vec![("grant_type", "refresh_token"), ("refresh_token", token)]
            }
            None => {
                tracing::info!("requesting public access token");
                vec![
                    ("grant_type", INSTALLED_CLIENT_GRANT),
                    ("device_id", DEVICE_ID),
                ]
            }
        };

        let url = format!("{}/api/v1/access_token", self.auth_base);
        let response = http
            .post(&url)
            .basic_auth(&self.client_id, Some(""))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            tracing::debug!("token endpoint response: {}", body);
            return Err(Error::Authentication {
                code: field_string(&body, "error"),
                message: field_string(&body, "message"),
            });
        }

        let token: TokenResponse = serde_json::from_value(body)?;
        Ok(format!("Bearer {}", token.access_token))
    }
}

/// Pulls a field out of an error body, stringifying non-string values
/// (the server reports numeric codes and plain strings interchangeably).
fn field_string(body: &Value, key: &str) -> String {
    match body.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "unknown".into(),
    }
}
