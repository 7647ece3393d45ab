use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::api_key::ApiKeyPlacement;
use super::error::DispatchError;

/// Free-form credential mapping as submitted by the caller.
pub type Credentials = serde_json::Map<String, Value>;

pub const SESSION_TOKEN_HEADER: &str = "Session-Token";

/// Authentication scheme selector stored on a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthType {
    #[serde(rename = "No_Auth")]
    NoAuth,
    #[serde(rename = "API_Key")]
    ApiKey,
    #[serde(rename = "Bearer")]
    Bearer,
    #[serde(rename = "Basic_HTTP")]
    BasicHttp,
    #[serde(rename = "Session_Token")]
    SessionToken,
}

impl AuthType {
    pub const ALL: [AuthType; 5] = [
        AuthType::NoAuth,
        AuthType::ApiKey,
        AuthType::Bearer,
        AuthType::BasicHttp,
        AuthType::SessionToken,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::NoAuth => "No_Auth",
            AuthType::ApiKey => "API_Key",
            AuthType::Bearer => "Bearer",
            AuthType::BasicHttp => "Basic_HTTP",
            AuthType::SessionToken => "Session_Token",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|auth_type| auth_type.as_str() == s)
            .ok_or_else(|| DispatchError::UnsupportedAuthType(s.to_string()))
    }
}

/// A fully validated authentication strategy, one variant per auth type.
///
/// Built from raw credentials with [`AuthStrategy::from_credentials`], which
/// rejects missing keys up front so a request is never sent with a blank
/// secret.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthStrategy {
    NoAuth,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
    SessionToken {
        token: String,
    },
    ApiKey {
        placement: ApiKeyPlacement,
        parameter_name: String,
        api_key: String,
    },
}

impl AuthStrategy {
    /// Parse the auth type label and validate the credentials it requires.
    pub fn parse(auth_type: &str, credentials: Option<&Credentials>) -> Result<Self, DispatchError> {
        Self::from_credentials(auth_type.parse()?, credentials)
    }

    pub fn from_credentials(auth_type: AuthType, credentials: Option<&Credentials>) -> Result<Self, DispatchError> {
        let required = |key: &'static str| required_credential(credentials, auth_type, key, false);

        let strategy = match auth_type {
            AuthType::NoAuth => AuthStrategy::NoAuth,
            AuthType::Bearer => AuthStrategy::Bearer {
                token: required("token")?,
            },
            AuthType::BasicHttp => AuthStrategy::Basic {
                username: required("username")?,
                // An empty password is a legitimate Basic credential
                password: required_credential(credentials, auth_type, "password", true)?,
            },
            AuthType::SessionToken => AuthStrategy::SessionToken {
                token: required("session_token")?,
            },
            AuthType::ApiKey => {
                let placement: ApiKeyPlacement = required("inject_into")?.parse()?;
                let parameter_name = required("parameter_name")?;
                let api_key = required("api_key")?;

                if placement == ApiKeyPlacement::Header {
                    HeaderName::from_bytes(parameter_name.as_bytes()).map_err(|_| {
                        DispatchError::InvalidCredential {
                            key: "parameter_name",
                            reason: format!("'{}' is not a valid HTTP header name", parameter_name),
                        }
                    })?;
                    HeaderValue::from_str(&api_key).map_err(|_| DispatchError::InvalidCredential {
                        key: "api_key",
                        reason: "contains characters not allowed in an HTTP header".to_string(),
                    })?;
                }

                AuthStrategy::ApiKey {
                    placement,
                    parameter_name,
                    api_key,
                }
            }
        };

        Ok(strategy)
    }

    pub fn auth_type(&self) -> AuthType {
        match self {
            AuthStrategy::NoAuth => AuthType::NoAuth,
            AuthStrategy::Bearer { .. } => AuthType::Bearer,
            AuthStrategy::Basic { .. } => AuthType::BasicHttp,
            AuthStrategy::SessionToken { .. } => AuthType::SessionToken,
            AuthStrategy::ApiKey { .. } => AuthType::ApiKey,
        }
    }

    /// HTTP method used for the connectivity request
    pub fn method(&self) -> Method {
        match self {
            AuthStrategy::ApiKey { placement, .. } if placement.uses_body() => Method::POST,
            _ => Method::GET,
        }
    }
}

// Secrets never reach logs through Debug.
impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStrategy::NoAuth => f.write_str("NoAuth"),
            AuthStrategy::Bearer { .. } => f.debug_struct("Bearer").field("token", &"<redacted>").finish(),
            AuthStrategy::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            AuthStrategy::SessionToken { .. } => f
                .debug_struct("SessionToken")
                .field("token", &"<redacted>")
                .finish(),
            AuthStrategy::ApiKey {
                placement,
                parameter_name,
                ..
            } => f
                .debug_struct("ApiKey")
                .field("placement", placement)
                .field("parameter_name", parameter_name)
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

fn required_credential(
    credentials: Option<&Credentials>,
    auth_type: AuthType,
    key: &'static str,
    allow_empty: bool,
) -> Result<String, DispatchError> {
    let missing = || DispatchError::MissingCredential { auth_type, key };

    let value = credentials
        .and_then(|c| c.get(key))
        .filter(|v| !v.is_null())
        .ok_or_else(missing)?;

    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) | Value::Null => {
            return Err(DispatchError::InvalidCredential {
                key,
                reason: "expected a string value".to_string(),
            });
        }
    };

    if text.is_empty() && !allow_empty {
        return Err(missing());
    }

    Ok(text)
}
