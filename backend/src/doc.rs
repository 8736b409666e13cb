//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, grills,
//!   health)
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`FieldErrorSchema`])
//!   that provide OpenAPI definitions without coupling domain types to the
//!   utoipa framework
//! - **Security**: Bearer token authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{ErrorSchema, FieldErrorSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("JWT issued by POST /auth/login."))
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
        title = "Pimp Your Grill backend API",
        description = "HTTP interface for accounts, grill showcases, likes, and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::me,
        crate::inbound::http::grills::list_grills,
        crate::inbound::http::grills::leaderboard,
        crate::inbound::http::grills::my_grills,
        crate::inbound::http::grills::all_grills,
        crate::inbound::http::grills::get_grill,
        crate::inbound::http::grills::create_grill,
        crate::inbound::http::grills::update_grill,
        crate::inbound::http::grills::delete_grill,
        crate::inbound::http::grills::toggle_like,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, FieldErrorSchema)),
    tags(
        (name = "auth", description = "Registration, login, and the current account"),
        (name = "grills", description = "Grill showcases, likes, and the leaderboard"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.DomainError";
    const FIELD_ERROR_SCHEMA_NAME: &str = "crate.domain.FieldError";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "errors");
    }

    #[test]
    fn openapi_field_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let field_schema = schemas
            .get(FIELD_ERROR_SCHEMA_NAME)
            .expect("FieldError schema");

        assert_object_schema_has_field(field_schema, "field");
        assert_object_schema_has_field(field_schema, "message");
    }

    #[test]
    fn openapi_document_registers_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/auth/register",
            "/auth/login",
            "/auth/me",
            "/items",
            "/items/leaderboard",
            "/items/mine",
            "/items/all",
            "/items/{id}",
            "/items/{id}/like",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "document should describe {path}");
        }
    }
}
