//! Request logging middleware.
//!
//! Every request outside the excluded paths gets a correlation id, a
//! `http_request` span, and one completion line whose level follows the
//! response status. The request id is echoed in `x-request-id`.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    time::Instant,
};
use tracing::{error, info, info_span, warn, Instrument};

use crate::trace_context::{RequestContext, REQUEST_ID_HEADER};

const DEFAULT_SLOW_REQUEST_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct RequestLogConfig {
    pub service_name: String,
    /// Path prefixes that are passed through untouched
    pub exclude_paths: Vec<String>,
    pub slow_request_threshold_ms: u64,
}

impl RequestLogConfig {
    pub fn for_service(name: impl Into<String>) -> Self {
        Self {
            service_name: name.into(),
            exclude_paths: vec!["/health".to_string()],
            slow_request_threshold_ms: DEFAULT_SLOW_REQUEST_MS,
        }
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.exclude_paths.iter().any(|p| path.starts_with(p.as_str()))
    }
}

/// How a finished request is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Ok,
    Slow,
    ClientError,
    ServerError,
}

impl Completion {
    fn classify(status: u16, duration_ms: u64, slow_threshold_ms: u64) -> Self {
        match status {
            500..=u16::MAX => Completion::ServerError,
            400..=499 => Completion::ClientError,
            _ if duration_ms > slow_threshold_ms => Completion::Slow,
            _ => Completion::Ok,
        }
    }
}

#[derive(Clone)]
pub struct RequestLogging {
    config: Rc<RequestLogConfig>,
}

impl RequestLogging {
    pub fn new(config: RequestLogConfig) -> Self {
        Self { config: Rc::new(config) }
    }
}

/// Request logging for `service_name` with default settings
pub fn observability(service_name: impl Into<String>) -> RequestLogging {
    RequestLogging::new(RequestLogConfig::for_service(service_name))
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingService {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct RequestLoggingService<S> {
    service: Rc<S>,
    config: Rc<RequestLogConfig>,
}

impl<S, B> Service<ServiceRequest> for RequestLoggingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let config = self.config.clone();
        let service = self.service.clone();

        Box::pin(async move {
            if config.is_excluded(req.path()) {
                return service.call(req).await;
            }

            let ctx = RequestContext::from_request(req.request());
            let method = req.method().to_string();
            let path = req.path().to_string();

            let span = info_span!(
                "http_request",
                service = %config.service_name,
                trace_id = %ctx.trace_id,
                request_id = %ctx.request_id,
                method = %method,
                path = %path,
            );

            let started = Instant::now();
            let result = service.call(req).instrument(span).await;
            let duration_ms = started.elapsed().as_millis() as u64;

            let mut res = match result {
                Ok(res) => res,
                Err(e) => {
                    error!(
                        request_id = %ctx.request_id,
                        duration_ms,
                        error = %e,
                        "{} {} failed after {}ms", method, path, duration_ms
                    );
                    return Err(e);
                }
            };

            let status = res.status().as_u16();
            match Completion::classify(status, duration_ms, config.slow_request_threshold_ms) {
                Completion::ServerError => {
                    error!(request_id = %ctx.request_id, status, duration_ms, "{} {} {}", method, path, status)
                }
                Completion::ClientError => {
                    warn!(request_id = %ctx.request_id, status, duration_ms, "{} {} {}", method, path, status)
                }
                Completion::Slow => {
                    warn!(request_id = %ctx.request_id, status, duration_ms, "slow request {} {}", method, path)
                }
                Completion::Ok => {
                    info!(request_id = %ctx.request_id, status, duration_ms, "{} {} {}", method, path, status)
                }
            }

            if let Ok(value) = HeaderValue::from_str(&ctx.request_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            Ok(res)
        })
    }
}
