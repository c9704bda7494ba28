#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! HTTP server hosting the user admin page.

pub mod config;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, Result, http, middleware, route, web, web::Json};
use serde_json::{Value, json};
use user_admin_client::{UserAccountsApi, UserAccountsClient};
use user_admin_htmx::ADMIN_PATH;
use user_admin_http::{HttpClient, reqwest::ReqwestClient};

pub use config::{ConfigError, ServerConfig};

#[route("/health", method = "GET")]
pub async fn health_endpoint() -> Result<Json<Value>> {
    log::trace!("health_endpoint");
    Ok(Json(json!({"healthy": true})))
}

/// Builds the user-account client every request handler shares.
#[must_use]
pub fn user_accounts_api(config: &ServerConfig) -> Arc<dyn UserAccountsApi> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::default());

    Arc::new(
        UserAccountsClient::new(http, config.api_url.clone())
            .with_credentials(config.credentials.clone()),
    )
}

/// Binds and runs the server until it is stopped.
///
/// # Errors
///
/// * If the server fails to bind to the configured address
/// * If the server fails while running
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let api = user_accounts_api(&config);

    log::info!(
        "Starting user admin server on {}:{} against {}",
        config.bind_addr,
        config.port,
        config.api_url
    );

    let app = move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![http::header::ACCEPT, http::header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(actix_htmx::HtmxMiddleware {})
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(web::Data::from(api.clone()))
            .service(health_endpoint)
            .service(user_admin_htmx::api::bind_services(web::scope(ADMIN_PATH)))
    };

    let mut http_server = HttpServer::new(app);

    if let Some(workers) = config.workers {
        log::debug!("Running with {workers} Actix workers");
        http_server = http_server.workers(workers);
    }

    http_server
        .bind((config.bind_addr.as_str(), config.port))?
        .run()
        .await?;

    log::debug!("Server stopped");

    Ok(())
}

#[cfg(test)]
mod tests {
    use actix_web::test;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test_log::test(actix_web::test)]
    async fn health_reports_healthy() {
        let app = test::init_service(App::new().service(health_endpoint)).await;

        let response: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request())
                .await;

        assert_eq!(response, json!({"healthy": true}));
    }

    #[test_log::test(actix_web::test)]
    async fn admin_page_is_mounted() {
        let config = ServerConfig {
            bind_addr: "127.0.0.1".to_string(),
            port: 0,
            api_url: "http://localhost:8080".to_string(),
            credentials: None,
            workers: None,
        };

        let app = test::init_service(
            App::new()
                .wrap(actix_htmx::HtmxMiddleware {})
                .app_data(web::Data::from(user_accounts_api(&config)))
                .service(user_admin_htmx::api::bind_services(web::scope(ADMIN_PATH))),
        )
        .await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/admin").to_request()).await;

        assert!(response.status().is_success());
    }
}
