//! Structured domain events for connector lifecycle and connectivity tests.
//!
//! Events carry connector ids and auth scheme names only, never credential
//! values. They are logged under the `domain_event` target so they can be
//! filtered apart from request logs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

pub const DOMAIN_EVENT_TARGET: &str = "domain_event";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationResult {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Connector,
    Connectivity,
}

/// Something that happened to a connector.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorEvent<'a> {
    ConnectionTested {
        connector_id: Uuid,
        auth_type: &'a str,
        /// `None` when no upstream response arrived
        upstream_status: Option<u16>,
        duration_ms: u64,
        /// Set when the test did not connect
        failure: Option<&'a str>,
    },
    Created {
        connector_id: Uuid,
        status: &'a str,
    },
    Updated {
        connector_id: Uuid,
        status: &'a str,
    },
    Published {
        connector_id: Uuid,
    },
    Deleted {
        connector_id: Uuid,
    },
}

/// Serialized form of a [`ConnectorEvent`]
#[derive(Debug, Clone, Serialize)]
pub struct DomainEvent {
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub category: EventCategory,
    pub event_type: &'static str,
    pub connector_id: Uuid,
    pub result: OperationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
}

impl ConnectorEvent<'_> {
    pub fn event_type(&self) -> &'static str {
        match self {
            ConnectorEvent::ConnectionTested { .. } => "connection_tested",
            ConnectorEvent::Created { .. } => "connector_created",
            ConnectorEvent::Updated { .. } => "connector_updated",
            ConnectorEvent::Published { .. } => "connector_published",
            ConnectorEvent::Deleted { .. } => "connector_deleted",
        }
    }

    pub fn connector_id(&self) -> Uuid {
        match self {
            ConnectorEvent::ConnectionTested { connector_id, .. }
            | ConnectorEvent::Created { connector_id, .. }
            | ConnectorEvent::Updated { connector_id, .. }
            | ConnectorEvent::Published { connector_id }
            | ConnectorEvent::Deleted { connector_id } => *connector_id,
        }
    }

    pub fn record(&self, service: &str) -> DomainEvent {
        let mut event = DomainEvent {
            timestamp: Utc::now(),
            service: service.to_string(),
            category: EventCategory::Connector,
            event_type: self.event_type(),
            connector_id: self.connector_id(),
            result: OperationResult::Success,
            duration_ms: None,
            error: None,
            metadata: Value::Null,
        };

        match self {
            ConnectorEvent::ConnectionTested {
                auth_type,
                upstream_status,
                duration_ms,
                failure,
                ..
            } => {
                event.category = EventCategory::Connectivity;
                event.duration_ms = Some(*duration_ms);
                event.metadata = json!({
                    "auth_type": auth_type,
                    "upstream_status": upstream_status,
                });
                if let Some(failure) = failure {
                    event.result = OperationResult::Failure;
                    event.error = Some(failure.to_string());
                }
            }
            ConnectorEvent::Created { status, .. } | ConnectorEvent::Updated { status, .. } => {
                event.metadata = json!({ "status": status });
            }
            ConnectorEvent::Published { .. } | ConnectorEvent::Deleted { .. } => {}
        }

        event
    }

    /// Log the event on behalf of `service`
    pub fn emit(&self, service: &str) {
        let event = self.record(service);
        let payload = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());

        match event.result {
            OperationResult::Success => tracing::info!(
                target: DOMAIN_EVENT_TARGET,
                event_type = event.event_type,
                connector_id = %event.connector_id,
                "DomainEvent: {}", payload
            ),
            OperationResult::Failure => tracing::warn!(
                target: DOMAIN_EVENT_TARGET,
                event_type = event.event_type,
                connector_id = %event.connector_id,
                error = ?event.error,
                "DomainEvent: {}", payload
            ),
        }
    }
}
