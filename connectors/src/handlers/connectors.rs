use actix_web::{web, HttpResponse};
use custom_connectors_database::ConnectorStatus;
use serde_json::json;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::ConnectorPayload;
use crate::services::ConnectorService;

pub async fn create_connector(
    payload: web::Json<ConnectorPayload>,
    service: web::Data<ConnectorService>,
) -> Result<HttpResponse, ServiceError> {
    let connector = service.create(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Connector created successfully",
        "data": connector
    })))
}

pub async fn update_connector(
    path: web::Path<Uuid>,
    payload: web::Json<ConnectorPayload>,
    service: web::Data<ConnectorService>,
) -> Result<HttpResponse, ServiceError> {
    let connector = service.update(path.into_inner(), payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Connector updated successfully",
        "data": connector
    })))
}

pub async fn publish_connector(
    path: web::Path<Uuid>,
    service: web::Data<ConnectorService>,
) -> Result<HttpResponse, ServiceError> {
    let connector = service.publish(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Connector published successfully",
        "data": connector
    })))
}

pub async fn delete_connector(
    path: web::Path<Uuid>,
    service: web::Data<ConnectorService>,
) -> Result<HttpResponse, ServiceError> {
    service.delete(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Connector deleted successfully"
    })))
}

pub async fn get_connector(
    path: web::Path<Uuid>,
    service: web::Data<ConnectorService>,
) -> Result<HttpResponse, ServiceError> {
    let connector = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": connector })))
}

pub async fn list_connectors(service: web::Data<ConnectorService>) -> Result<HttpResponse, ServiceError> {
    let connectors = service.list().await?;
    Ok(HttpResponse::Ok().json(json!({ "data": connectors })))
}

pub async fn list_drafts(service: web::Data<ConnectorService>) -> Result<HttpResponse, ServiceError> {
    let connectors = service.list_by_status(ConnectorStatus::Draft).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": connectors })))
}

pub async fn list_published(service: web::Data<ConnectorService>) -> Result<HttpResponse, ServiceError> {
    let connectors = service.list_by_status(ConnectorStatus::Published).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": connectors })))
}
