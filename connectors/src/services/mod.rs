pub mod connector_service;

pub use connector_service::{ConnectorService, SERVICE_NAME};
