//! Role catalog lookup.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::entities::role;
use common::AppResult;
use domain::{Role, RoleName};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Catalog of canonical role records.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleCatalog: Send + Sync {
    async fn find_by_name(&self, name: RoleName) -> AppResult<Option<Role>>;
}

/// SeaORM-backed role catalog (rows are seeded by migration)
pub struct DbRoleCatalog {
    db: DatabaseConnection,
}

impl DbRoleCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleCatalog for DbRoleCatalog {
    async fn find_by_name(&self, name: RoleName) -> AppResult<Option<Role>> {
        role::Entity::find()
            .filter(role::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await?
            .map(role::Model::into_role)
            .transpose()
    }
}
