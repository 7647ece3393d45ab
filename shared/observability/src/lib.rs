//! Observability for the connector service
//!
//! - Structured JSON or pretty logging via `tracing-subscriber`
//! - Request id extraction and echoing
//! - Domain events for connector lifecycle and connectivity tests
//! - HTTP middleware for request/response logging

pub mod domain_events;
pub mod init;
pub mod middleware;
pub mod trace_context;

pub use domain_events::*;
pub use init::*;
pub use middleware::*;
pub use trace_context::*;
