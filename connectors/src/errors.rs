use actix_web::{HttpResponse, ResponseError};
use custom_connectors_database::StoreError;
use std::fmt;

use crate::dispatch::DispatchError;

#[derive(Debug)]
pub enum ServiceError {
    BadRequest(String),
    NotFound(String),
    ValidationError(String),
    UnsupportedAuthType(String),
    UnsupportedInjectionMethod(String),
    DatabaseError(String),
    ExternalApiError(String),
}

impl ServiceError {
    pub fn connector_not_found() -> Self {
        ServiceError::NotFound("Connector not found".to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            ServiceError::UnsupportedAuthType(msg) => write!(f, "Unsupported Auth Type: {}", msg),
            ServiceError::UnsupportedInjectionMethod(msg) => write!(f, "Unsupported Injection Method: {}", msg),
            ServiceError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            ServiceError::ExternalApiError(msg) => write!(f, "External API Error: {}", msg),
        }
    }
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::BadRequest(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Bad Request",
                    "message": msg
                }))
            }
            ServiceError::NotFound(msg) => {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": "Not Found",
                    "message": msg
                }))
            }
            ServiceError::ValidationError(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Validation Error",
                    "message": msg
                }))
            }
            ServiceError::UnsupportedAuthType(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Unsupported Auth Type",
                    "message": msg
                }))
            }
            ServiceError::UnsupportedInjectionMethod(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Unsupported Injection Method",
                    "message": msg
                }))
            }
            ServiceError::DatabaseError(msg) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Database Error",
                    "message": msg
                }))
            }
            ServiceError::ExternalApiError(msg) => {
                HttpResponse::BadGateway().json(serde_json::json!({
                    "error": "External API Error",
                    "message": msg
                }))
            }
        }
    }
}

impl From<DispatchError> for ServiceError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::UnsupportedAuthType(auth_type) => ServiceError::UnsupportedAuthType(format!(
                "'{}' is not one of: No_Auth, API_Key, Bearer, Basic_HTTP, Session_Token",
                auth_type
            )),
            DispatchError::UnsupportedInjectionMethod(method) => ServiceError::UnsupportedInjectionMethod(format!(
                "'{}' is not one of: Query Parameter, Header, Body data (urlencoded form), Body JSON payload",
                method
            )),
            DispatchError::Transport { message, .. } => ServiceError::ExternalApiError(message),
            other => ServiceError::ValidationError(other.to_string()),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        ServiceError::DatabaseError(error.to_string())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(errors.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        ServiceError::ValidationError(error.to_string())
    }
}
