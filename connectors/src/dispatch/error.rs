use thiserror::Error;

use super::auth::AuthType;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Unsupported auth type: {0}")]
    UnsupportedAuthType(String),

    #[error("Unsupported API key injection method: {0}")]
    UnsupportedInjectionMethod(String),

    #[error("Missing credential '{key}' required by {auth_type}")]
    MissingCredential { auth_type: AuthType, key: &'static str },

    #[error("Invalid credential '{key}': {reason}")]
    InvalidCredential { key: &'static str, reason: String },

    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {message}")]
    Transport { status: Option<u16>, message: String },
}

impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        DispatchError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
