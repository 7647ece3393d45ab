use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::services::{ConnectorService, SERVICE_NAME};

pub async fn health_check(service: web::Data<ConnectorService>) -> HttpResponse {
    let store = service.store();
    let store_status = match store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::error!("Store health check failed: {}", e);
            "disconnected"
        }
    };

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "store": store.backend(),
        "database": store_status,
        "timestamp": chrono::Utc::now()
    }))
}
