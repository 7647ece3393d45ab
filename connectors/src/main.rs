use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use custom_connectors::{configure_routes, ConnectorService, Dispatcher};
use custom_connectors::services::SERVICE_NAME;
use custom_connectors_config::ServiceConfig;
use custom_connectors_database::{ConnectorStore, Database, DatabaseConfig, InMemoryConnectorStore};
use custom_connectors_observability::{init_tracing, observability, TracingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env();
    init_tracing(TracingConfig::for_service(SERVICE_NAME));

    let store: Arc<dyn ConnectorStore> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("📊 [Connector Service] Connecting to database...");
            let db_config = DatabaseConfig::new(database_url.clone())
                .with_max_connections(config.db_max_connections)
                .with_migrations(config.run_migrations);
            let db = Database::connect(&db_config).await?;
            tracing::info!("✅ [Connector Service] Database connection established");
            Arc::new(db.connector_store())
        }
        None => {
            tracing::warn!(
                "[Connector Service] DATABASE_URL not set - running in minimal mode, connectors are kept in memory only"
            );
            Arc::new(InMemoryConnectorStore::new())
        }
    };

    let client = reqwest::Client::builder()
        .user_agent(config.upstream_user_agent.clone())
        .build()
        .context("Failed to build HTTP client")?;

    let service = web::Data::new(ConnectorService::new(store, Dispatcher::new(client)));
    let cors_origin = config.cors_allowed_origin.clone();

    let (host, port) = config.bind_address();
    tracing::info!("🚀 [Connector Service] Starting on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default().allowed_origin(origin),
            None => Cors::default().allow_any_origin(),
        }
        .allow_any_method()
        .allow_any_header();

        App::new()
            .app_data(service.clone())
            .wrap(cors)
            .wrap(observability(SERVICE_NAME))
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run()
    .await?;

    Ok(())
}
