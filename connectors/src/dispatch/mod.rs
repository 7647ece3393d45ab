//! Authenticated request dispatch against third-party HTTP APIs.
//!
//! A connectivity check is a single request: the resolved URL is parsed,
//! the [`AuthStrategy`] attaches exactly one authentication mechanism, and
//! the raw status and body come back as a [`DispatchOutcome`]. There are no
//! retries and no timeout beyond the client's defaults.

pub mod api_key;
pub mod auth;
pub mod error;

pub use api_key::ApiKeyPlacement;
pub use auth::{AuthStrategy, AuthType, Credentials, SESSION_TOKEN_HEADER};
pub use error::DispatchError;

use reqwest::{Client, Request};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Raw upstream response
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub status: u16,
    pub body: String,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as JSON when it parses, otherwise as a JSON string.
    /// An empty body maps to `null`.
    pub fn body_json(&self) -> Value {
        if self.body.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}

#[derive(Clone, Default)]
pub struct Dispatcher {
    client: Client,
}

impl Dispatcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the request for `url` under `strategy` without sending it.
    pub fn prepare(&self, url: &str, strategy: &AuthStrategy) -> Result<Request, DispatchError> {
        let mut target = Url::parse(url).map_err(|e| DispatchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(target.scheme(), "http" | "https") || !target.has_host() {
            return Err(DispatchError::InvalidUrl {
                url: url.to_string(),
                reason: "expected an absolute http(s) URL".to_string(),
            });
        }

        let builder = match strategy {
            AuthStrategy::NoAuth => self.client.get(target),
            AuthStrategy::Bearer { token } => self.client.get(target).bearer_auth(token),
            AuthStrategy::Basic { username, password } => {
                self.client.get(target).basic_auth(username, Some(password))
            }
            AuthStrategy::SessionToken { token } => self
                .client
                .get(target)
                .header(SESSION_TOKEN_HEADER, token.as_str()),
            AuthStrategy::ApiKey {
                placement,
                parameter_name,
                api_key,
            } => match placement {
                ApiKeyPlacement::QueryParameter => {
                    api_key::append_query_pair(&mut target, parameter_name, api_key);
                    self.client.get(target)
                }
                ApiKeyPlacement::Header => self
                    .client
                    .get(target)
                    .header(parameter_name.as_str(), api_key.as_str()),
                ApiKeyPlacement::FormBody => self
                    .client
                    .post(target)
                    .form(&[(parameter_name.as_str(), api_key.as_str())]),
                ApiKeyPlacement::JsonBody => {
                    let mut body = serde_json::Map::new();
                    body.insert(parameter_name.clone(), Value::String(api_key.clone()));
                    self.client.post(target).json(&body)
                }
            },
        };

        builder
            .build()
            .map_err(|e| DispatchError::InvalidRequest(e.to_string()))
    }

    /// Send a prepared request and collect status and body.
    pub async fn execute(&self, request: Request) -> Result<DispatchOutcome, DispatchError> {
        debug!(method = %request.method(), host = ?request.url().host_str(), "Dispatching upstream request");

        let response = self.client.execute(request).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(DispatchOutcome { status, body })
    }
}
