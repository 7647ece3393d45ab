use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// A persisted custom connector definition.
///
/// `auth_type` and `status` are stored as text; callers parse them into
/// typed values at the edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CustomConnector {
    pub id: Uuid,
    pub base_url: String,
    pub stream_url: String,
    pub auth_type: String,
    pub auth_credentials: Option<serde_json::Value>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomConnector {
    pub fn status(&self) -> Option<ConnectorStatus> {
        self.status.parse().ok()
    }

    pub fn is_published(&self) -> bool {
        self.status() == Some(ConnectorStatus::Published)
    }
}

/// Field set supplied on create and on wholesale replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConnector {
    pub base_url: String,
    pub stream_url: String,
    pub auth_type: String,
    pub auth_credentials: Option<serde_json::Value>,
    pub status: ConnectorStatus,
}

/// Lifecycle state of a connector. Moves from draft to published only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStatus {
    #[default]
    Draft,
    Published,
}

impl ConnectorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorStatus::Draft => "draft",
            ConnectorStatus::Published => "published",
        }
    }

    /// Whether a connector currently in `self` may be stored as `next`.
    pub fn can_transition_to(&self, next: ConnectorStatus) -> bool {
        !matches!((self, next), (ConnectorStatus::Published, ConnectorStatus::Draft))
    }
}

impl fmt::Display for ConnectorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ConnectorStatus::Draft),
            "published" => Ok(ConnectorStatus::Published),
            other => Err(format!(
                "invalid status '{}', expected one of: draft, published",
                other
            )),
        }
    }
}
