//! Issue lifecycle: validation, ownership and persistence.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{DomainError, InvalidInput, Issue, IssueDraft, Principal};

use crate::repository::IssueStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Issue service trait for dependency injection.
///
/// Ids arrive as `Option` because the HTTP layer may not be able to supply
/// one; a missing id is rejected as invalid input before any store access.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IssueService: Send + Sync {
    /// Validate and persist a new issue owned by `owner`
    async fn create(&self, draft: IssueDraft, owner: &Principal) -> AppResult<Issue>;

    /// Overwrite the mutable fields of an existing issue
    async fn update(&self, id: Option<Uuid>, draft: IssueDraft) -> AppResult<Issue>;

    async fn get_by_id(&self, id: Option<Uuid>) -> AppResult<Issue>;

    async fn list_all(&self) -> AppResult<Vec<Issue>>;

    /// Delete an issue; an unknown id is a silent success
    async fn delete_by_id(&self, id: Option<Uuid>) -> AppResult<()>;
}

/// Concrete implementation of IssueService using the issue store.
pub struct IssueManager {
    store: Arc<dyn IssueStore>,
}

impl IssueManager {
    pub fn new(store: Arc<dyn IssueStore>) -> Self {
        Self { store }
    }
}

fn require_id(id: Option<Uuid>) -> Result<Uuid, DomainError> {
    id.ok_or(DomainError::InvalidInput(InvalidInput::IssueId))
}

#[async_trait]
impl IssueService for IssueManager {
    async fn create(&self, draft: IssueDraft, owner: &Principal) -> AppResult<Issue> {
        let fields = draft.validate()?;
        let issue = self.store.save(Issue::new(fields, owner.id)).await?;

        info!(issue_id = %issue.id, owner_id = %owner.id, "Issue created");
        Ok(issue)
    }

    async fn update(&self, id: Option<Uuid>, draft: IssueDraft) -> AppResult<Issue> {
        let id = require_id(id)?;
        let fields = draft.validate()?;

        let mut issue = self.store.find_by_id(id).await?.ok_or_not_found()?;
        issue.apply(fields);

        let issue = self.store.save(issue).await?;
        info!(issue_id = %issue.id, "Issue updated");
        Ok(issue)
    }

    async fn get_by_id(&self, id: Option<Uuid>) -> AppResult<Issue> {
        let id = require_id(id)?;
        debug!(issue_id = %id, "Fetching issue");
        self.store.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_all(&self) -> AppResult<Vec<Issue>> {
        self.store.find_all().await
    }

    async fn delete_by_id(&self, id: Option<Uuid>) -> AppResult<()> {
        let id = require_id(id)?;
        self.store.delete_by_id(id).await?;

        info!(issue_id = %id, "Issue deleted");
        Ok(())
    }
}
