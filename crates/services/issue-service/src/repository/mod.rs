//! Repository layer for issue data access.

pub mod entities;
mod issue_repository;

pub use issue_repository::{DbIssueStore, IssueStore};

#[cfg(any(test, feature = "test-utils"))]
pub use issue_repository::MockIssueStore;
