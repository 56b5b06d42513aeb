//! Application state for dependency injection.

use std::sync::Arc;

use auth_service::AuthService;
use issue_service::IssueService;
use sea_orm::DatabaseConnection;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub issues: Arc<dyn IssueService>,
    /// Used by the health check only
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(
        auth: Arc<dyn AuthService>,
        issues: Arc<dyn IssueService>,
        db: DatabaseConnection,
    ) -> Self {
        Self { auth, issues, db }
    }
}
