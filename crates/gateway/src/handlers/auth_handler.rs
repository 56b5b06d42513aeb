//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{IdentityResponse, Session};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 50, message = "Email cannot exceed 50 characters")
    )]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(min = 6, max = 40, message = "Password must be between 6 and 40 characters"))]
    #[schema(example = "s3cret!", min_length = 6, max_length = 40)]
    pub password: String,
    /// Requested role tokens: "admin", "mod"; anything else grants the user role
    #[schema(example = json!(["mod"]))]
    pub role: Option<Vec<String>>,
}

/// Signin request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SigninRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "s3cret!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
}

/// Register a new identity
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Identity registered", body = IdentityResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<IdentityResponse>)> {
    let requested_roles = payload.role.map(|tokens| tokens.into_iter().collect());

    let identity = state
        .auth
        .register(payload.username, payload.email, payload.password, requested_roles)
        .await?;

    Ok((StatusCode::CREATED, Json(IdentityResponse::from(identity))))
}

/// Authenticate and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = "Authentication",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Authenticated", body = Session),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Bad credentials")
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SigninRequest>,
) -> AppResult<Json<Session>> {
    let session = state
        .auth
        .authenticate(payload.username, payload.password)
        .await?;

    Ok(Json(session))
}
