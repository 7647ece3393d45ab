// Repository pattern for connector persistence

pub mod custom_connector;
pub mod memory;

pub use custom_connector::PgConnectorStore;
pub use memory::InMemoryConnectorStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ConnectorStatus, CustomConnector, NewConnector};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Record store for connector definitions.
///
/// Each call is atomic for the row it touches. Operations addressing a
/// missing id return `None`/`false` rather than an error.
#[async_trait]
pub trait ConnectorStore: Send + Sync {
    /// Short backend name reported by health checks
    fn backend(&self) -> &'static str;

    /// Check that the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Insert a new connector with a freshly assigned id and timestamps
    async fn create(&self, input: &NewConnector) -> StoreResult<CustomConnector>;

    /// Find connector by ID
    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<CustomConnector>>;

    /// Overwrite every user-supplied field of an existing connector
    async fn replace(&self, id: &Uuid, input: &NewConnector) -> StoreResult<Option<CustomConnector>>;

    /// Change only the lifecycle status
    async fn set_status(&self, id: &Uuid, status: ConnectorStatus) -> StoreResult<Option<CustomConnector>>;

    /// Delete a connector by ID, reporting whether a row was removed
    async fn delete(&self, id: &Uuid) -> StoreResult<bool>;

    /// All connectors with the given status, oldest first
    async fn find_by_status(&self, status: ConnectorStatus) -> StoreResult<Vec<CustomConnector>>;

    /// All connectors, oldest first
    async fn list(&self) -> StoreResult<Vec<CustomConnector>>;
}
