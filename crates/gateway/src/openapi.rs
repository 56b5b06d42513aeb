//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::{SigninRequest, SignupRequest};
use domain::{IdentityResponse, Issue, IssueDraft, Session, Severity};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::signup,
        crate::handlers::auth_handler::signin,
        crate::handlers::issue_handler::create_issue,
        crate::handlers::issue_handler::update_issue,
        crate::handlers::issue_handler::get_issue,
        crate::handlers::issue_handler::list_issues,
        crate::handlers::issue_handler::delete_issue,
    ),
    components(
        schemas(
            SignupRequest,
            SigninRequest,
            IdentityResponse,
            Session,
            Issue,
            IssueDraft,
            Severity,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup and signin endpoints"),
        (name = "Issues", description = "Issue management endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
