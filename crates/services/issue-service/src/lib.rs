//! Issue Service Library
//!
//! Issue lifecycle management: validation, ownership attribution and
//! persistence of issue records.

pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::repository::DbIssueStore;

pub use crate::service::{IssueManager, IssueService};

/// Build the production issue service over a database connection.
pub fn build_issue_service(db: DatabaseConnection) -> Arc<dyn IssueService> {
    Arc::new(IssueManager::new(Arc::new(DbIssueStore::new(db))))
}
