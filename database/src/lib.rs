// Persistence layer for custom connector definitions.
// Postgres is the production backend; the in-memory store backs minimal mode and tests.

pub mod config;
pub mod models;
pub mod repositories;

// Re-export commonly used items
pub use sqlx;
pub use uuid;
pub use chrono;
pub use config::DatabaseConfig;
pub use models::{ConnectorStatus, CustomConnector, NewConnector};
pub use repositories::{ConnectorStore, InMemoryConnectorStore, PgConnectorStore, StoreError, StoreResult};

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

/// Database connection manager
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to Postgres and, when configured, bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        // Disable server-side prepared statements for pgbouncer/Neon
        let connect_options = PgConnectOptions::from_str(&config.database_url)
            .context("Invalid database URL")?
            .statement_cache_capacity(0);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(connect_options)
            .await
            .context("Failed to connect to database")?;

        let db = Self { pool };
        if config.run_migrations {
            db.migrate().await?;
        }

        Ok(db)
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Connector store backed by this pool
    pub fn connector_store(&self) -> PgConnectorStore {
        PgConnectorStore::new(self.pool.clone())
    }
}
