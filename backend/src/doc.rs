//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API. It registers the eco-action endpoint, the health
//! probes, the shared error envelope schema, and the bearer-token security
//! scheme. The generated specification backs Swagger UI in debug builds.

use crate::inbound::http::eco_actions::{
    LocationBody, LogActionRequestBody, LogActionResponseBody,
};
use crate::inbound::http::schemas::ErrorSchema;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Firebase ID token issued to the signed-in user."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "EcoTrack backend API",
        description = "HTTP interface for logging geotagged eco-actions and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::eco_actions::log_eco_action,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LogActionRequestBody,
        LocationBody,
        LogActionResponseBody,
        ErrorSchema
    )),
    tags(
        (name = "eco-actions", description = "Operations recording eco-actions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
