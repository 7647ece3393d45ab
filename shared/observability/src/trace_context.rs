//! Request correlation ids.
//!
//! Accepts a W3C `traceparent`, `x-trace-id` or `x-request-id` from the
//! caller and generates fresh ids otherwise. The ids stay inside this
//! service and are never forwarded to third-party APIs.

use actix_web::HttpRequest;
use uuid::Uuid;

pub const TRACE_ID_HEADER: &str = "x-trace-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const W3C_TRACEPARENT_HEADER: &str = "traceparent";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub trace_id: String,
    /// Echoed back to the caller in `x-request-id`
    pub request_id: String,
    /// Caller's span from `traceparent`
    pub parent_span_id: Option<String>,
}

impl RequestContext {
    pub fn generate() -> Self {
        let id = Uuid::new_v4().to_string();
        Self {
            trace_id: id.clone(),
            request_id: id,
            parent_span_id: None,
        }
    }

    pub fn from_request(req: &HttpRequest) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let mut ctx = header(W3C_TRACEPARENT_HEADER)
            .and_then(|tp| parse_traceparent(&tp))
            .or_else(|| {
                header(TRACE_ID_HEADER).map(|trace_id| Self {
                    request_id: trace_id.clone(),
                    trace_id,
                    parent_span_id: None,
                })
            })
            .unwrap_or_else(Self::generate);

        if let Some(request_id) = header(REQUEST_ID_HEADER) {
            ctx.request_id = request_id;
        }

        ctx
    }
}

/// `version-trace_id-parent_id-flags`, e.g. `00-4bf92f...-00f067...-01`
fn parse_traceparent(value: &str) -> Option<RequestContext> {
    let mut parts = value.split('-');
    let _version = parts.next()?;
    let trace_id = parts.next().filter(|p| !p.is_empty())?;
    let parent = parts.next().filter(|p| !p.is_empty())?;

    Some(RequestContext {
        trace_id: trace_id.to_string(),
        request_id: trace_id.to_string(),
        parent_span_id: Some(parent.to_string()),
    })
}
