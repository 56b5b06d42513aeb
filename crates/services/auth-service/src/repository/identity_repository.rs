//! Identity persistence.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, RelationTrait, Set, SqlErr, TransactionTrait,
};
use sea_orm::sea_query::JoinType;

use super::entities::{role, user, user_role};
use common::{AppError, AppResult};
use domain::{DomainError, Identity, Role};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Lookup and persistence of identities.
///
/// Uniqueness of username and email is enforced by the store; the
/// `exists_*` checks are a fast path, not the guarantee.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;

    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Find an identity, with its roles, by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Identity>>;

    /// Persist a new identity and its role memberships
    async fn save(&self, identity: Identity) -> AppResult<Identity>;
}

/// SeaORM-backed identity store
pub struct DbIdentityStore {
    db: DatabaseConnection,
}

impl DbIdentityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn roles_of(&self, user_id: uuid::Uuid) -> AppResult<BTreeSet<Role>> {
        let models = role::Entity::find()
            .join(JoinType::InnerJoin, role::Relation::UserRoles.def())
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        models.into_iter().map(role::Model::into_role).collect()
    }
}

#[async_trait]
impl IdentityStore for DbIdentityStore {
    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Identity>> {
        let Some(model) = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let roles = self.roles_of(model.id).await?;

        Ok(Some(Identity {
            id: model.id,
            username: model.username,
            email: model.email,
            credential_hash: model.password_hash,
            roles,
            created_at: model.created_at,
        }))
    }

    async fn save(&self, identity: Identity) -> AppResult<Identity> {
        let txn = self.db.begin().await?;

        user::ActiveModel {
            id: Set(identity.id),
            username: Set(identity.username.clone()),
            email: Set(identity.email.clone()),
            password_hash: Set(identity.credential_hash.clone()),
            created_at: Set(identity.created_at),
        }
        .insert(&txn)
        .await
        .map_err(unique_violation)?;

        let memberships = identity.roles.iter().map(|role| user_role::ActiveModel {
            user_id: Set(identity.id),
            role_id: Set(role.id),
        });
        user_role::Entity::insert_many(memberships)
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;

        tracing::debug!(identity_id = %identity.id, "Identity persisted");
        Ok(identity)
    }
}

/// Map a unique-constraint violation to the matching domain conflict.
fn unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => match conflict_from_message(&msg) {
            Some(conflict) => conflict.into(),
            None => AppError::Database(err),
        },
        _ => AppError::Database(err),
    }
}

/// Pick the conflict kind from the violated constraint named in the message.
fn conflict_from_message(msg: &str) -> Option<DomainError> {
    if msg.contains("username") {
        Some(DomainError::UsernameAlreadyExists)
    } else if msg.contains("email") {
        Some(DomainError::EmailAlreadyExists)
    } else {
        None
    }
}
