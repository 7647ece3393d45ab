use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::{ConnectorStatus, CustomConnector, NewConnector};
use super::{ConnectorStore, StoreResult};

/// Process-local store used when no database is configured.
///
/// Insertion order doubles as creation order for listings.
#[derive(Default)]
pub struct InMemoryConnectorStore {
    rows: RwLock<IndexMap<Uuid, CustomConnector>>,
}

impl InMemoryConnectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

#[async_trait]
impl ConnectorStore for InMemoryConnectorStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create(&self, input: &NewConnector) -> StoreResult<CustomConnector> {
        let now = Utc::now();
        let connector = CustomConnector {
            id: Uuid::new_v4(),
            base_url: input.base_url.clone(),
            stream_url: input.stream_url.clone(),
            auth_type: input.auth_type.clone(),
            auth_credentials: input.auth_credentials.clone(),
            status: input.status.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.rows.write().insert(connector.id, connector.clone());
        Ok(connector)
    }

    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<CustomConnector>> {
        Ok(self.rows.read().get(id).cloned())
    }

    async fn replace(&self, id: &Uuid, input: &NewConnector) -> StoreResult<Option<CustomConnector>> {
        let mut rows = self.rows.write();
        let Some(row) = rows.get_mut(id) else {
            return Ok(None);
        };

        row.base_url = input.base_url.clone();
        row.stream_url = input.stream_url.clone();
        row.auth_type = input.auth_type.clone();
        row.auth_credentials = input.auth_credentials.clone();
        row.status = input.status.as_str().to_string();
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn set_status(&self, id: &Uuid, status: ConnectorStatus) -> StoreResult<Option<CustomConnector>> {
        let mut rows = self.rows.write();
        let Some(row) = rows.get_mut(id) else {
            return Ok(None);
        };

        row.status = status.as_str().to_string();
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &Uuid) -> StoreResult<bool> {
        Ok(self.rows.write().shift_remove(id).is_some())
    }

    async fn find_by_status(&self, status: ConnectorStatus) -> StoreResult<Vec<CustomConnector>> {
        Ok(self
            .rows
            .read()
            .values()
            .filter(|c| c.status == status.as_str())
            .cloned()
            .collect())
    }

    async fn list(&self) -> StoreResult<Vec<CustomConnector>> {
        Ok(self.rows.read().values().cloned().collect())
    }
}
