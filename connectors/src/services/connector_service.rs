use std::sync::Arc;
use std::time::Instant;

use custom_connectors_database::{ConnectorStatus, ConnectorStore, CustomConnector, NewConnector};
use custom_connectors_observability::ConnectorEvent;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dispatch::{AuthStrategy, AuthType, DispatchError, Dispatcher};
use crate::errors::ServiceError;
use crate::models::{ConnectorPayload, TestOutcome, TestUrlRequest};
use crate::resolver;

pub const SERVICE_NAME: &str = "connector-service";

/// Connector management and connectivity testing on top of a record store.
pub struct ConnectorService {
    store: Arc<dyn ConnectorStore>,
    dispatcher: Dispatcher,
}

impl ConnectorService {
    pub fn new(store: Arc<dyn ConnectorStore>, dispatcher: Dispatcher) -> Self {
        Self { store, dispatcher }
    }

    pub fn store(&self) -> &Arc<dyn ConnectorStore> {
        &self.store
    }

    /// Test connectivity and record the attempt as a new draft connector.
    ///
    /// Input problems (invalid fields, unknown auth type or injection point,
    /// missing credentials, unusable URL) are rejected before any network
    /// call and nothing is stored. Once a request has been attempted a draft
    /// is always created, whether the upstream answered 2xx, answered with an
    /// error status, or could not be reached at all.
    pub async fn test_connection(&self, request: TestUrlRequest) -> Result<TestOutcome, ServiceError> {
        request.validate()?;

        let strategy = AuthStrategy::parse(&request.auth_type, request.auth_credentials.as_ref())?;
        let full_url = resolver::resolve(&request.base_url, &request.stream_url);
        let prepared = self.dispatcher.prepare(&full_url, &strategy)?;

        info!(
            auth_type = %strategy.auth_type(),
            method = %strategy.method(),
            "Testing connector connectivity"
        );

        let started = Instant::now();
        let result = self.dispatcher.execute(prepared).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let connector = self
            .store
            .create(&NewConnector {
                base_url: request.base_url,
                stream_url: request.stream_url,
                auth_type: request.auth_type,
                auth_credentials: request.auth_credentials.map(Value::Object),
                status: ConnectorStatus::Draft,
            })
            .await?;

        let outcome = match result {
            Ok(response) if response.is_success() => TestOutcome::Connected {
                connector_id: connector.id,
                data: response.body_json(),
            },
            Ok(response) => TestOutcome::Failed {
                connector_id: connector.id,
                status: Some(response.status),
                error: None,
            },
            Err(DispatchError::Transport { status, message }) => {
                warn!(connector_id = %connector.id, "Upstream request failed: {}", message);
                TestOutcome::Failed {
                    connector_id: connector.id,
                    status,
                    error: Some(message),
                }
            }
            Err(other) => return Err(other.into()),
        };

        let failure = match &outcome {
            TestOutcome::Connected { .. } => None,
            TestOutcome::Failed { status: Some(code), .. } => Some(format!("upstream returned {}", code)),
            TestOutcome::Failed { error, .. } => error.clone(),
        };
        let upstream_status = match &outcome {
            TestOutcome::Failed { status, .. } => *status,
            TestOutcome::Connected { .. } => None,
        };
        ConnectorEvent::ConnectionTested {
            connector_id: connector.id,
            auth_type: strategy.auth_type().as_str(),
            upstream_status,
            duration_ms,
            failure: failure.as_deref(),
        }
        .emit(SERVICE_NAME);

        Ok(outcome)
    }

    pub async fn create(&self, payload: ConnectorPayload) -> Result<CustomConnector, ServiceError> {
        let input = Self::new_connector(payload)?;
        let connector = self.store.create(&input).await?;

        ConnectorEvent::Created {
            connector_id: connector.id,
            status: &connector.status,
        }
        .emit(SERVICE_NAME);
        Ok(connector)
    }

    /// Replace every field of an existing connector.
    pub async fn update(&self, id: Uuid, payload: ConnectorPayload) -> Result<CustomConnector, ServiceError> {
        let input = Self::new_connector(payload)?;

        let existing = self
            .store
            .find_by_id(&id)
            .await?
            .ok_or_else(ServiceError::connector_not_found)?;

        if let Some(current) = existing.status() {
            if !current.can_transition_to(input.status) {
                return Err(ServiceError::ValidationError(format!(
                    "status cannot change from {} to {}",
                    current, input.status
                )));
            }
        }

        let connector = self
            .store
            .replace(&id, &input)
            .await?
            .ok_or_else(ServiceError::connector_not_found)?;

        ConnectorEvent::Updated {
            connector_id: connector.id,
            status: &connector.status,
        }
        .emit(SERVICE_NAME);
        Ok(connector)
    }

    /// Mark a connector as published. Publishing twice is a no-op.
    pub async fn publish(&self, id: Uuid) -> Result<CustomConnector, ServiceError> {
        let connector = self
            .store
            .set_status(&id, ConnectorStatus::Published)
            .await?
            .ok_or_else(ServiceError::connector_not_found)?;

        ConnectorEvent::Published { connector_id: connector.id }.emit(SERVICE_NAME);
        Ok(connector)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.store.delete(&id).await? {
            return Err(ServiceError::connector_not_found());
        }

        ConnectorEvent::Deleted { connector_id: id }.emit(SERVICE_NAME);
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<CustomConnector, ServiceError> {
        self.store
            .find_by_id(&id)
            .await?
            .ok_or_else(ServiceError::connector_not_found)
    }

    pub async fn list_by_status(&self, status: ConnectorStatus) -> Result<Vec<CustomConnector>, ServiceError> {
        Ok(self.store.find_by_status(status).await?)
    }

    pub async fn list(&self) -> Result<Vec<CustomConnector>, ServiceError> {
        Ok(self.store.list().await?)
    }

    fn new_connector(payload: ConnectorPayload) -> Result<NewConnector, ServiceError> {
        payload.validate()?;

        let auth_type: AuthType = payload.auth_type.parse()?;
        let status: ConnectorStatus = payload
            .status
            .parse()
            .map_err(ServiceError::ValidationError)?;

        Ok(NewConnector {
            base_url: payload.base_url,
            stream_url: payload.stream_url,
            auth_type: auth_type.as_str().to_string(),
            auth_credentials: payload.auth_credentials.map(Value::Object),
            status,
        })
    }
}
