//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the search and health endpoints, the error schema
//! wrappers from [`crate::inbound::http::schemas`] and the `Authorization`
//! header security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::SearchResponse;

/// Name of the security scheme in the generated document.
const ACCESS_TOKEN_SCHEME: &str = "AccessToken";

/// Enrich the generated document with the access token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            ACCESS_TOKEN_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Access token issued at login, bare or prefixed with `Bearer `.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Social backend API",
        description = "Ranked user directory search and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("AccessToken" = [])),
    paths(
        crate::inbound::http::users::search_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(SearchResponse, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "User directory search"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

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
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "success");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn search_path_is_documented_with_query_parameters() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/user/search").expect("search path");
        let operation = item.get.as_ref().expect("GET operation");
        let names: Vec<&str> = operation
            .parameters
            .iter()
            .flatten()
            .map(|param| param.name.as_str())
            .collect();
        for expected in ["search", "offset", "rowCount", "Authorization"] {
            assert!(names.contains(&expected), "missing parameter {expected}");
        }
    }

    #[test]
    fn access_token_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(ACCESS_TOKEN_SCHEME));
    }
}
