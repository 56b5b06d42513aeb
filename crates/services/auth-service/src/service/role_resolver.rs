//! Maps requested signup role tokens to canonical role records.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use common::AppResult;
use domain::{role_names_for_tokens, DomainError, Role};

use crate::repository::RoleCatalog;

pub struct RoleResolver {
    catalog: Arc<dyn RoleCatalog>,
}

impl RoleResolver {
    pub fn new(catalog: Arc<dyn RoleCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve requested tokens to catalog roles.
    ///
    /// No tokens means `ROLE_USER`. A canonical role missing from the
    /// catalog fails with `RoleNotFound`.
    pub async fn resolve(&self, requested: Option<&HashSet<String>>) -> AppResult<BTreeSet<Role>> {
        let names = role_names_for_tokens(requested.into_iter().flatten().map(String::as_str));

        let mut roles = BTreeSet::new();
        for name in names {
            let role = self
                .catalog
                .find_by_name(name)
                .await?
                .ok_or(DomainError::RoleNotFound(name))?;
            roles.insert(role);
        }

        Ok(roles)
    }
}
