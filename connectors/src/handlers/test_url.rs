use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::ServiceError;
use crate::models::TestUrlRequest;
use crate::services::ConnectorService;

/// `GET /test-url`
///
/// Reads the request from the JSON body, or from the query string when the
/// body is empty. Always answers 200 once the upstream was attempted.
pub async fn test_url(
    req: HttpRequest,
    body: web::Bytes,
    service: web::Data<ConnectorService>,
) -> Result<HttpResponse, ServiceError> {
    let request = parse_request(&req, &body)?;
    let outcome = service.test_connection(request).await?;

    Ok(HttpResponse::Ok().json(outcome.to_response_body()))
}

fn parse_request(req: &HttpRequest, body: &[u8]) -> Result<TestUrlRequest, ServiceError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return web::Query::<TestUrlRequest>::from_query(req.query_string())
            .map(web::Query::into_inner)
            .map_err(|e| ServiceError::BadRequest(e.to_string()));
    }

    Ok(serde_json::from_slice(body)?)
}
