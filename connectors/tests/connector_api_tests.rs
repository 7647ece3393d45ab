//! HTTP-level tests for the connector service.
//!
//! The service runs against the in-memory store, and wiremock stands in for
//! the third-party API so the injected credentials can be asserted.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use custom_connectors::{configure_routes, ConnectorService, Dispatcher};
use custom_connectors_database::{ConnectorStore, InMemoryConnectorStore};

// =============================================================================
// Test Helpers
// =============================================================================

fn setup_service() -> (web::Data<ConnectorService>, Arc<InMemoryConnectorStore>) {
    let store = Arc::new(InMemoryConnectorStore::new());
    let service = ConnectorService::new(store.clone(), Dispatcher::default());
    (web::Data::new(service), store)
}

macro_rules! init_app {
    ($service:expr) => {
        test::init_service(App::new().app_data($service.clone()).configure(configure_routes)).await
    };
}

fn connector_payload(status: &str) -> Value {
    json!({
        "base_url": "https://pokeapi.co/api/v2/pokemon",
        "stream_url": "/pikachu",
        "auth_type": "Bearer",
        "auth_credentials": { "token": "abc" },
        "status": status
    })
}

// =============================================================================
// Connectivity Tests
// =============================================================================

#[actix_web::test]
async fn test_url_bearer_success_saves_draft() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/pikachu"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "pikachu" })))
        .expect(1)
        .mount(&server)
        .await;

    let (service, store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::get()
        .uri("/test-url")
        .set_json(json!({
            "base_url": format!("{}/api/v2/pokemon/", server.uri()),
            "stream_url": "/pikachu",
            "auth_type": "Bearer",
            "auth_credentials": { "token": "abc" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Connection successful");
    assert_eq!(body["data"]["name"], "pikachu");

    let id: Uuid = body["connector_id"].as_str().unwrap().parse().unwrap();
    let saved = store.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(saved.status, "draft");
    assert_eq!(saved.auth_type, "Bearer");
    assert_eq!(saved.auth_credentials, Some(json!({ "token": "abc" })));
}

#[actix_web::test]
async fn test_url_api_key_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "zkwnfknnn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "temp": 11 })))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::get()
        .uri("/test-url")
        .set_json(json!({
            "base_url": server.uri(),
            "stream_url": "data/2.5/weather?q=London",
            "auth_type": "API_Key",
            "auth_credentials": {
                "inject_into": "Query Parameter",
                "parameter_name": "appid",
                "api_key": "zkwnfknnn"
            }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Connection successful");
    assert_eq!(body["data"]["temp"], 11);
}

#[actix_web::test]
async fn test_url_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(header("X-Api-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::get()
        .uri("/test-url")
        .set_json(json!({
            "base_url": server.uri(),
            "stream_url": "/v1/items",
            "auth_type": "API_Key",
            "auth_credentials": {
                "inject_into": "Header",
                "parameter_name": "X-Api-Key",
                "api_key": "secret"
            }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Connection successful");
    assert_eq!(body["data"], "ok");
}

#[actix_web::test]
async fn test_url_api_key_json_body_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({ "key": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::get()
        .uri("/test-url")
        .set_json(json!({
            "base_url": server.uri(),
            "stream_url": "graphql",
            "auth_type": "API_Key",
            "auth_credentials": {
                "inject_into": "Body JSON payload",
                "parameter_name": "key",
                "api_key": "secret"
            }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Connection successful");
    assert_eq!(body["data"]["ok"], true);
}

#[actix_web::test]
async fn test_url_api_key_form_body_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string("api_key=s%26cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::get()
        .uri("/test-url")
        .set_json(json!({
            "base_url": server.uri(),
            "stream_url": "/token",
            "auth_type": "API_Key",
            "auth_credentials": {
                "inject_into": "Body data (urlencoded form)",
                "parameter_name": "api_key",
                "api_key": "s&cret"
            }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Connection successful");
}

#[actix_web::test]
async fn test_url_upstream_error_reports_status_and_saves_draft() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (service, store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::get()
        .uri("/test-url")
        .set_json(json!({
            "base_url": server.uri(),
            "stream_url": "/private",
            "auth_type": "Session_Token",
            "auth_credentials": { "session_token": "expired" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Connection failed");
    assert_eq!(body["status"], 401);
    assert!(body.get("error").is_none());
    assert_eq!(store.len(), 1);
}

#[actix_web::test]
async fn test_url_unreachable_upstream_saves_draft() {
    let (service, store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::get()
        .uri("/test-url")
        .set_json(json!({
            "base_url": "http://127.0.0.1:1",
            "stream_url": "/nothing-here",
            "auth_type": "No_Auth"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Connection failed");
    assert!(body["status"].is_null());
    assert!(body["error"].is_string());

    let drafts = store.list().await.unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].status, "draft");
    assert_eq!(body["connector_id"], drafts[0].id.to_string());
}

#[actix_web::test]
async fn test_url_reads_query_string_when_body_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "up": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _store) = setup_service();
    let app = init_app!(service);

    let uri = format!(
        "/test-url?base_url={}&stream_url=status&auth_type=No_Auth",
        server.uri().replace(':', "%3A").replace('/', "%2F")
    );
    let req = test::TestRequest::get().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Connection successful");
    assert_eq!(body["data"]["up"], true);
}

#[actix_web::test]
async fn test_url_rejects_invalid_input_without_saving() {
    let (service, store) = setup_service();
    let app = init_app!(service);

    let cases = [
        json!({
            "base_url": "https://api.example.com",
            "stream_url": "/a",
            "auth_type": "OAuth2"
        }),
        json!({
            "base_url": "https://api.example.com",
            "stream_url": "/a",
            "auth_type": "API_Key",
            "auth_credentials": { "inject_into": "Cookie", "parameter_name": "k", "api_key": "v" }
        }),
        json!({
            "base_url": "https://api.example.com",
            "stream_url": "/a",
            "auth_type": "Basic_HTTP",
            "auth_credentials": { "username": "ash" }
        }),
        json!({
            "base_url": "not a url",
            "stream_url": "/a",
            "auth_type": "No_Auth"
        }),
        json!({
            "stream_url": "/a",
            "auth_type": "No_Auth"
        }),
    ];

    for case in cases {
        let req = test::TestRequest::get().uri("/test-url").set_json(&case).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "case: {}", case);
    }

    assert!(store.is_empty());
}

#[actix_web::test]
async fn test_unsupported_auth_type_error_body() {
    let (service, _store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::get()
        .uri("/test-url")
        .set_json(json!({
            "base_url": "https://api.example.com",
            "stream_url": "/a",
            "auth_type": "Digest"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unsupported Auth Type");
    assert!(body["message"].as_str().unwrap().contains("Digest"));
}

// =============================================================================
// Connector Management Tests
// =============================================================================

#[actix_web::test]
async fn test_create_and_fetch_connector() {
    let (service, _store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/connectors")
        .set_json(connector_payload("draft"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Connector created successfully");
    assert_eq!(body["data"]["status"], "draft");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get().uri(&format!("/connectors/{}", id)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["base_url"], "https://pokeapi.co/api/v2/pokemon");

    let req = test::TestRequest::get().uri("/connectors").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_create_rejects_bad_payloads() {
    let (service, store) = setup_service();
    let app = init_app!(service);

    let unknown_status = connector_payload("archived");
    let mut missing_status = connector_payload("draft");
    missing_status.as_object_mut().unwrap().remove("status");
    let mut bad_auth = connector_payload("draft");
    bad_auth["auth_type"] = json!("Kerberos");

    for payload in [unknown_status, missing_status, bad_auth] {
        let req = test::TestRequest::post().uri("/connectors").set_json(&payload).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
    }

    assert!(store.is_empty());
}

#[actix_web::test]
async fn test_update_is_idempotent() {
    let (service, _store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/connectors")
        .set_json(connector_payload("draft"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let mut update = connector_payload("draft");
    update["stream_url"] = json!("/bulbasaur");

    let mut results = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::put()
            .uri(&format!("/connectors/{}", id))
            .set_json(&update)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Connector updated successfully");
        results.push(body["data"].clone());
    }

    for field in ["id", "base_url", "stream_url", "auth_type", "auth_credentials", "status", "created_at"] {
        assert_eq!(results[0][field], results[1][field], "field {}", field);
    }
    assert_eq!(results[1]["stream_url"], "/bulbasaur");
}

#[actix_web::test]
async fn test_publish_and_status_lists() {
    let (service, _store) = setup_service();
    let app = init_app!(service);

    let mut ids = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/connectors")
            .set_json(connector_payload("draft"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::put()
        .uri(&format!("/connectors/publish/{}", ids[1]))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Connector published successfully");
    assert_eq!(body["data"]["status"], "published");

    let req = test::TestRequest::get().uri("/connectors/drafts").to_request();
    let drafts: Value = test::call_and_read_body_json(&app, req).await;
    let drafts = drafts["data"].as_array().unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0]["id"], ids[0]);

    let req = test::TestRequest::get().uri("/connectors/published").to_request();
    let published: Value = test::call_and_read_body_json(&app, req).await;
    let published = published["data"].as_array().unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0]["id"], ids[1]);

    // Published connectors stay published
    let req = test::TestRequest::put()
        .uri(&format!("/connectors/{}", ids[1]))
        .set_json(connector_payload("draft"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_publish_unknown_connector_is_not_found() {
    let (service, store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::put()
        .uri(&format!("/connectors/publish/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Connector not found");
    assert!(store.is_empty());
}

#[actix_web::test]
async fn test_delete_connector() {
    let (service, store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/connectors")
        .set_json(connector_payload("published"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete().uri(&format!("/connectors/{}", id)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Connector deleted successfully");
    assert!(store.is_empty());

    let req = test::TestRequest::delete().uri(&format!("/connectors/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_reports_store_backend() {
    let (service, _store) = setup_service();
    let app = init_app!(service);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["database"], "connected");
}
