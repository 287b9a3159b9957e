//! Server construction and middleware wiring.

pub mod config;

pub use config::{AppConfig, AppConfigError, app_config_from_env};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpRequest, HttpServer, web};
use mockable::DefaultClock;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::Error;
use crate::domain::EcoActionService;
use crate::inbound::http::eco_actions::log_eco_action;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::outbound::firestore::{FirestoreHttpSettings, HttpEcoActionRepository};
use crate::outbound::identity::{HttpIdTokenVerifier, IdentityHttpSettings};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

/// Map a malformed JSON payload onto the standard error envelope.
fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    Error::invalid_request(format!("invalid request body: {err}")).into()
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(log_eco_action);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Assemble the HTTP state from configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when either upstream client cannot be built.
fn build_http_state(config: &AppConfig) -> std::io::Result<web::Data<HttpState>> {
    let identity_settings = IdentityHttpSettings::new(&config.api_key, config.upstream_timeout)
        .map_err(|e| std::io::Error::other(format!("identity endpoint misconfigured: {e}")))?;
    let verifier = HttpIdTokenVerifier::new(identity_settings)
        .map_err(|e| std::io::Error::other(format!("identity client construction failed: {e}")))?;

    let mut store_settings = FirestoreHttpSettings::new(&config.project_id, config.upstream_timeout)
        .map_err(|e| std::io::Error::other(format!("document store misconfigured: {e}")))?;
    if let Some(token) = &config.access_token {
        store_settings = store_settings.with_access_token(token);
    }
    let repository = HttpEcoActionRepository::new(store_settings)
        .map_err(|e| std::io::Error::other(format!("document store client failed: {e}")))?;

    let actions = EcoActionService::new(Arc::new(repository), Arc::new(DefaultClock));
    Ok(web::Data::new(HttpState::new(
        Arc::new(actions),
        Arc::new(verifier),
    )))
}

/// Construct an Actix HTTP server from the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when client construction or socket binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: AppConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
