//! Issue persistence.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Insert, QueryOrder, Set};
use uuid::Uuid;

use super::entities::issue::{self, ActiveModel, Entity as IssueEntity};
use common::AppResult;
use domain::Issue;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Issue store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Insert or overwrite by id, returning the stored issue
    async fn save(&self, issue: Issue) -> AppResult<Issue>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Issue>>;

    async fn find_all(&self) -> AppResult<Vec<Issue>>;

    /// Remove by id; removing an unknown id is not an error
    async fn delete_by_id(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed issue store
pub struct DbIssueStore {
    db: DatabaseConnection,
}

/// Insert by id, or overwrite the editable columns of an existing row.
///
/// `owner_id` and `created_at` are left untouched on conflict.
fn upsert(issue: &Issue) -> Insert<ActiveModel> {
    let active = ActiveModel {
        id: Set(issue.id),
        title: Set(issue.title.clone()),
        description: Set(issue.description.clone()),
        status: Set(issue.status.clone()),
        responsible: Set(issue.responsible.clone()),
        severity: Set(issue.severity.to_string()),
        owner_id: Set(issue.owner_id),
        created_at: Set(issue.created_at),
        updated_at: Set(issue.updated_at),
    };

    IssueEntity::insert(active).on_conflict(
        OnConflict::column(issue::Column::Id)
            .update_columns([
                issue::Column::Title,
                issue::Column::Description,
                issue::Column::Status,
                issue::Column::Responsible,
                issue::Column::Severity,
                issue::Column::UpdatedAt,
            ])
            .to_owned(),
    )
}

impl DbIssueStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IssueStore for DbIssueStore {
    async fn save(&self, issue: Issue) -> AppResult<Issue> {
        upsert(&issue).exec_without_returning(&self.db).await?;

        Ok(issue)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Issue>> {
        let model = IssueEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Issue::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Issue>> {
        let models = IssueEntity::find()
            .order_by_asc(issue::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Issue::from).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        let result = IssueEntity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!(issue_id = %id, rows = result.rows_affected, "Issue delete executed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{IssueFields, Severity};
    use sea_orm::{DbBackend, QueryTrait};

    fn issue() -> Issue {
        let fields = IssueFields {
            title: "Crash on login".to_string(),
            description: "Empty form returns 500".to_string(),
            status: "OPEN".to_string(),
            responsible: "bob".to_string(),
            severity: Severity::Major,
        };
        Issue::new(fields, Uuid::new_v4())
    }

    #[test]
    fn test_upsert_keeps_owner_and_creation_time() {
        let sql = upsert(&issue()).build(DbBackend::Postgres).to_string();
        let (insert, on_conflict) = sql.split_once("ON CONFLICT").unwrap();

        assert!(insert.contains(r#""owner_id""#));
        assert!(insert.contains(r#""created_at""#));

        assert!(on_conflict.starts_with(r#" ("id") DO UPDATE SET"#));
        for column in ["title", "description", "status", "responsible", "severity", "updated_at"] {
            assert!(
                on_conflict.contains(&format!(r#""{0}" = "excluded"."{0}""#, column)),
                "{} not updated",
                column
            );
        }
        assert!(!on_conflict.contains("owner_id"));
        assert!(!on_conflict.contains("created_at"));
    }
}
