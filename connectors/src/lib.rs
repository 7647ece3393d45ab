//! Custom connector service
//!
//! Lets users describe a third-party HTTP API (base URL, stream path and an
//! authentication scheme), test connectivity against it, and manage the
//! resulting connector definitions through a draft/published lifecycle.

pub mod dispatch;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod resolver;
pub mod services;

pub use dispatch::{ApiKeyPlacement, AuthStrategy, AuthType, DispatchError, DispatchOutcome, Dispatcher};
pub use errors::ServiceError;
pub use handlers::configure_routes;
pub use models::{ConnectorPayload, TestOutcome, TestUrlRequest};
pub use services::ConnectorService;
