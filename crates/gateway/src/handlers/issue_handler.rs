//! Issue handlers.
//!
//! Each handler applies its role gate before calling the issue service.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use common::AppResult;
use domain::{Issue, IssueDraft, Principal};

use crate::extractors::JsonBody;
use crate::middleware::{require_any_role, ISSUE_ADMINS, ISSUE_READERS, ISSUE_WRITERS};
use crate::state::AppState;

/// Create issue routes under `/api/issue`
///
/// The collection also answers on `/api/issue/`, which older clients post to.
pub fn issue_routes() -> Router<AppState> {
    Router::new()
        .route("/api/issue", get(list_issues).post(create_issue))
        .route("/api/issue/", get(list_issues).post(create_issue))
        .route(
            "/api/issue/:id",
            get(get_issue).put(update_issue).delete(delete_issue),
        )
}

/// An unparsable id is treated as no id at all.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// Create an issue owned by the caller
#[utoipa::path(
    post,
    path = "/api/issue",
    tag = "Issues",
    security(("bearer_auth" = [])),
    request_body = IssueDraft,
    responses(
        (status = 200, description = "Issue created", body = Issue),
        (status = 400, description = "Invalid issue fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - USER or MODERATOR only")
    )
)]
pub async fn create_issue(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<IssueDraft>,
) -> AppResult<Json<Issue>> {
    require_any_role(&principal, ISSUE_WRITERS)?;
    let issue = state.issues.create(draft, &principal).await?;
    Ok(Json(issue))
}

/// Overwrite an existing issue
#[utoipa::path(
    put,
    path = "/api/issue/{id}",
    tag = "Issues",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    request_body = IssueDraft,
    responses(
        (status = 200, description = "Issue updated", body = Issue),
        (status = 400, description = "Invalid id or issue fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - USER or MODERATOR only"),
        (status = 404, description = "Issue not found")
    )
)]
pub async fn update_issue(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<IssueDraft>,
) -> AppResult<Json<Issue>> {
    require_any_role(&principal, ISSUE_WRITERS)?;
    let issue = state.issues.update(parse_id(&id), draft).await?;
    Ok(Json(issue))
}

/// Get an issue by ID
#[utoipa::path(
    get,
    path = "/api/issue/{id}",
    tag = "Issues",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    responses(
        (status = 200, description = "Issue", body = Issue),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Issue not found")
    )
)]
pub async fn get_issue(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Issue>> {
    require_any_role(&principal, ISSUE_READERS)?;
    let issue = state.issues.get_by_id(parse_id(&id)).await?;
    Ok(Json(issue))
}

/// List all issues (admin only)
#[utoipa::path(
    get,
    path = "/api/issue",
    tag = "Issues",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All issues", body = Vec<Issue>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_issues(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Issue>>> {
    require_any_role(&principal, ISSUE_ADMINS)?;
    let issues = state.issues.list_all().await?;
    Ok(Json(issues))
}

/// Delete an issue (admin only); unknown ids succeed
#[utoipa::path(
    delete,
    path = "/api/issue/{id}",
    tag = "Issues",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    responses(
        (status = 200, description = "Issue deleted"),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn delete_issue(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<()> {
    require_any_role(&principal, ISSUE_ADMINS)?;
    state.issues.delete_by_id(parse_id(&id)).await
}
