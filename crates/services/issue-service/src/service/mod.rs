//! Issue business logic.

mod issue_service;

pub use issue_service::{IssueManager, IssueService};

#[cfg(any(test, feature = "test-utils"))]
pub use issue_service::MockIssueService;
