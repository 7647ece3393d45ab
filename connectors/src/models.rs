use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::dispatch::Credentials;
use crate::resolver::is_absolute_url;

/// Body (or query) of `GET /test-url`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TestUrlRequest {
    #[validate(custom(function = "validate_absolute_url"))]
    pub base_url: String,
    #[validate(length(min = 1, message = "stream_url is required"))]
    pub stream_url: String,
    #[validate(length(min = 1, message = "auth_type is required"))]
    pub auth_type: String,
    #[serde(default)]
    pub auth_credentials: Option<Credentials>,
}

/// Body of `POST /connectors` and `PUT /connectors/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConnectorPayload {
    #[validate(custom(function = "validate_absolute_url"))]
    pub base_url: String,
    #[validate(length(min = 1, message = "stream_url is required"))]
    pub stream_url: String,
    #[validate(length(min = 1, message = "auth_type is required"))]
    pub auth_type: String,
    #[serde(default)]
    pub auth_credentials: Option<Credentials>,
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

/// Result of a connectivity test. A draft connector exists in both cases.
#[derive(Debug, Clone, PartialEq)]
pub enum TestOutcome {
    Connected {
        connector_id: Uuid,
        data: Value,
    },
    Failed {
        connector_id: Uuid,
        /// Upstream status code, absent when no response arrived
        status: Option<u16>,
        /// Transport fault description when there was no upstream response
        error: Option<String>,
    },
}

impl TestOutcome {
    pub fn connector_id(&self) -> Uuid {
        match self {
            TestOutcome::Connected { connector_id, .. } | TestOutcome::Failed { connector_id, .. } => *connector_id,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, TestOutcome::Connected { .. })
    }

    pub fn to_response_body(&self) -> Value {
        match self {
            TestOutcome::Connected { connector_id, data } => serde_json::json!({
                "message": "Connection successful",
                "data": data,
                "connector_id": connector_id,
            }),
            TestOutcome::Failed { connector_id, status, error } => {
                let mut body = serde_json::json!({
                    "message": "Connection failed",
                    "status": status,
                    "connector_id": connector_id,
                });
                if let Some(error) = error {
                    body["error"] = Value::String(error.clone());
                }
                body
            }
        }
    }
}

fn validate_absolute_url(value: &str) -> Result<(), ValidationError> {
    if is_absolute_url(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("url");
        err.message = Some("base_url must be an absolute URL".into());
        Err(err)
    }
}
