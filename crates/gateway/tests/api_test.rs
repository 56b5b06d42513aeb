//! HTTP-level tests driving the router with in-memory services.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use auth_service::AuthService;
use common::{AppError, AppResult};
use domain::{DomainError, Identity, Issue, Principal, Role, RoleName, Session};
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;
use issue_service::repository::IssueStore;
use issue_service::IssueManager;

const USER_TOKEN: &str = "user-token";
const MOD_TOKEN: &str = "mod-token";
const ADMIN_TOKEN: &str = "admin-token";

/// Auth service accepting three fixed bearer tokens and one account.
struct FakeAuth {
    usernames: Mutex<HashSet<String>>,
    principals: HashMap<&'static str, Principal>,
}

impl FakeAuth {
    fn new() -> Self {
        let principal = |username: &str, role: RoleName| Principal {
            id: Uuid::new_v4(),
            username: username.to_string(),
            roles: BTreeSet::from([role]),
        };

        Self {
            usernames: Mutex::new(HashSet::from(["taken".to_string()])),
            principals: HashMap::from([
                (USER_TOKEN, principal("user", RoleName::User)),
                (MOD_TOKEN, principal("moderator", RoleName::Moderator)),
                (ADMIN_TOKEN, principal("admin", RoleName::Admin)),
            ]),
        }
    }
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn register(
        &self,
        username: String,
        email: String,
        _password: String,
        requested_roles: Option<HashSet<String>>,
    ) -> AppResult<Identity> {
        if !self.usernames.lock().unwrap().insert(username.clone()) {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let tokens = requested_roles.unwrap_or_default();
        let roles = domain::role_names_for_tokens(tokens.iter().map(String::as_str))
            .into_iter()
            .enumerate()
            .map(|(i, name)| Role { id: i as i32 + 1, name })
            .collect();

        Ok(Identity::new(username, email, "hash".to_string(), roles))
    }

    async fn authenticate(&self, username: String, password: String) -> AppResult<Session> {
        if username != "alice" || password != "s3cret!" {
            return Err(DomainError::AuthenticationFailure.into());
        }

        Ok(Session {
            token: USER_TOKEN.to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
            id: Uuid::new_v4(),
            username,
            email: "alice@example.com".to_string(),
            roles: vec!["ROLE_USER".to_string()],
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Principal> {
        self.principals
            .get(token)
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[derive(Default)]
struct MemoryIssues {
    rows: Mutex<HashMap<Uuid, Issue>>,
}

#[async_trait]
impl IssueStore for MemoryIssues {
    async fn save(&self, issue: Issue) -> AppResult<Issue> {
        self.rows.lock().unwrap().insert(issue.id, issue.clone());
        Ok(issue)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Issue>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Issue>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

fn app() -> Router {
    let state = AppState::new(
        Arc::new(FakeAuth::new()),
        Arc::new(IssueManager::new(Arc::new(MemoryIssues::default()))),
        DatabaseConnection::Disconnected,
    );
    create_router(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn issue_body() -> Value {
    json!({
        "title": "Crash on login",
        "description": "Submitting an empty form returns 500",
        "status": "OPEN",
        "responsible": "bob",
        "severity": "critical"
    })
}

#[tokio::test]
async fn test_signup_returns_created_summary() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "username": "moderator1",
            "email": "mod1@example.com",
            "password": "s3cret!",
            "role": ["mod", "other"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "moderator1");
    assert_eq!(body["roles"], json!(["ROLE_USER", "ROLE_MODERATOR"]));
    assert!(body.get("credential_hash").is_none());
}

#[tokio::test]
async fn test_signup_rejects_short_username() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({"username": "al", "email": "al@example.com", "password": "s3cret!"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_signup_reports_first_invalid_field_by_name() {
    let app = app();

    for _ in 0..5 {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({"username": "al", "email": "not-an-email", "password": "123"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Invalid email format");
    }
}

#[tokio::test]
async fn test_signup_duplicate_username_conflicts() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({"username": "taken", "email": "t@example.com", "password": "s3cret!"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "USERNAME_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_signin_success_and_failure() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signin",
        None,
        Some(json!({"username": "alice", "password": "s3cret!"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["roles"], json!(["ROLE_USER"]));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signin",
        None,
        Some(json!({"username": "alice", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Bad credentials");
}

#[tokio::test]
async fn test_issue_routes_require_token() {
    let app = app();

    let (status, _) = send(&app, Method::POST, "/api/issue", None, Some(issue_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/issue", Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = app();

    let (status, created) =
        send(&app, Method::POST, "/api/issue", Some(USER_TOKEN), Some(issue_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["severity"], "CRITICAL");

    let uri = format!("/api/issue/{}", created["id"].as_str().unwrap());
    let (status, fetched) = send(&app, Method::GET, &uri, Some(ADMIN_TOKEN), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_accepts_trailing_slash() {
    let app = app();

    let (status, created) =
        send(&app, Method::POST, "/api/issue/", Some(USER_TOKEN), Some(issue_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "Crash on login");

    let (status, _) = send(&app, Method::POST, "/api/issue/", None, Some(issue_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_cannot_create_issue() {
    let app = app();

    let (status, body) =
        send(&app, Method::POST, "/api/issue", Some(ADMIN_TOKEN), Some(issue_body())).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_create_reports_first_missing_field() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/issue",
        Some(MOD_TOKEN),
        Some(json!({"description": "no title", "status": "", "responsible": "bob"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["message"], "Title cannot be null or empty");
}

#[tokio::test]
async fn test_update_moves_fields_but_not_owner() {
    let app = app();

    let (_, created) =
        send(&app, Method::POST, "/api/issue", Some(USER_TOKEN), Some(issue_body())).await;
    let uri = format!("/api/issue/{}", created["id"].as_str().unwrap());

    let mut changed = issue_body();
    changed["status"] = json!("CLOSED");
    changed["severity"] = json!("bogus");
    let (status, updated) = send(&app, Method::PUT, &uri, Some(MOD_TOKEN), Some(changed)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["owner_id"], created["owner_id"]);
    assert_eq!(updated["status"], "CLOSED");
    assert_eq!(updated["severity"], "LOW");
}

#[tokio::test]
async fn test_malformed_id_is_invalid_input() {
    let app = app();

    let (status, body) =
        send(&app, Method::GET, "/api/issue/not-a-uuid", Some(USER_TOKEN), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Issue Id cannot be null");
}

#[tokio::test]
async fn test_get_unknown_issue_not_found() {
    let app = app();
    let uri = format!("/api/issue/{}", Uuid::new_v4());

    let (status, body) = send(&app, Method::GET, &uri, Some(USER_TOKEN), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_list_is_admin_only() {
    let app = app();
    send(&app, Method::POST, "/api/issue", Some(USER_TOKEN), Some(issue_body())).await;

    let (status, _) = send(&app, Method::GET, "/api/issue", Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::GET, "/api/issue", Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_delete_unknown_issue_succeeds() {
    let app = app();
    let uri = format!("/api/issue/{}", Uuid::new_v4());

    let (status, _) = send(&app, Method::DELETE, &uri, Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(MOD_TOKEN), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health_reports_unavailable_database() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}
