pub mod connectors;
pub mod health;
pub mod test_url;

use actix_web::web;

use crate::errors::ServiceError;

/// Register every route of the service.
///
/// The literal `/connectors/drafts` and `/connectors/published` routes are
/// registered ahead of `/connectors/{id}` so they are not captured as ids.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .route("/test-url", web::get().to(test_url::test_url))
        .service(
            web::scope("/connectors")
                .route("", web::post().to(connectors::create_connector))
                .route("", web::get().to(connectors::list_connectors))
                .route("/drafts", web::get().to(connectors::list_drafts))
                .route("/published", web::get().to(connectors::list_published))
                .route("/publish/{id}", web::put().to(connectors::publish_connector))
                .route("/{id}", web::get().to(connectors::get_connector))
                .route("/{id}", web::put().to(connectors::update_connector))
                .route("/{id}", web::delete().to(connectors::delete_connector)),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::ValidationError(err.to_string()).into()
    })
}
