use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ConnectorStatus, CustomConnector, NewConnector};
use super::{ConnectorStore, StoreResult};

const COLUMNS: &str =
    "id, base_url, stream_url, auth_type, auth_credentials, status, created_at, updated_at";

pub struct PgConnectorStore {
    pool: PgPool,
}

impl PgConnectorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectorStore for PgConnectorStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create(&self, input: &NewConnector) -> StoreResult<CustomConnector> {
        let sql = format!(
            r#"
            INSERT INTO custom_connectors (id, base_url, stream_url, auth_type, auth_credentials, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        );

        let connector = sqlx::query_as::<_, CustomConnector>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.base_url)
            .bind(&input.stream_url)
            .bind(&input.auth_type)
            .bind(&input.auth_credentials)
            .bind(input.status.as_str())
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(connector_id = %connector.id, "Inserted custom connector");
        Ok(connector)
    }

    async fn find_by_id(&self, id: &Uuid) -> StoreResult<Option<CustomConnector>> {
        let sql = format!("SELECT {COLUMNS} FROM custom_connectors WHERE id = $1");

        let connector = sqlx::query_as::<_, CustomConnector>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(connector)
    }

    async fn replace(&self, id: &Uuid, input: &NewConnector) -> StoreResult<Option<CustomConnector>> {
        let sql = format!(
            r#"
            UPDATE custom_connectors
            SET base_url = $1,
                stream_url = $2,
                auth_type = $3,
                auth_credentials = $4,
                status = $5,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $6
            RETURNING {COLUMNS}
            "#
        );

        let connector = sqlx::query_as::<_, CustomConnector>(&sql)
            .bind(&input.base_url)
            .bind(&input.stream_url)
            .bind(&input.auth_type)
            .bind(&input.auth_credentials)
            .bind(input.status.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(connector)
    }

    async fn set_status(&self, id: &Uuid, status: ConnectorStatus) -> StoreResult<Option<CustomConnector>> {
        let sql = format!(
            r#"
            UPDATE custom_connectors
            SET status = $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2
            RETURNING {COLUMNS}
            "#
        );

        let connector = sqlx::query_as::<_, CustomConnector>(&sql)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(connector)
    }

    async fn delete(&self, id: &Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM custom_connectors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_status(&self, status: ConnectorStatus) -> StoreResult<Vec<CustomConnector>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM custom_connectors WHERE status = $1 ORDER BY created_at ASC"
        );

        let connectors = sqlx::query_as::<_, CustomConnector>(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(connectors)
    }

    async fn list(&self) -> StoreResult<Vec<CustomConnector>> {
        let sql = format!("SELECT {COLUMNS} FROM custom_connectors ORDER BY created_at ASC");

        let connectors = sqlx::query_as::<_, CustomConnector>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(connectors)
    }
}
