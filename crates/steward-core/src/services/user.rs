//! User administration: the single place a user's role changes.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::access::AccessEvaluator;
use crate::error::{StewardError, StewardResult};
use crate::models::module::Module;
use crate::models::role::Role;
use crate::models::user::{CreateUserProfile, UserProfile};
use crate::registry::RoleRegistry;
use crate::repository::{PaginatedResult, Pagination, UserProfileRepository};

pub struct UserAdminService<R: UserProfileRepository> {
    repo: R,
    registry: Arc<RoleRegistry>,
}

impl<R: UserProfileRepository> UserAdminService<R> {
    pub fn new(repo: R, registry: Arc<RoleRegistry>) -> Self {
        Self { repo, registry }
    }

    fn authorize(&self, actor: Option<&Role>) -> StewardResult<()> {
        AccessEvaluator::new(&self.registry)
            .can_navigate(actor, Module::UserManagement)
            .into_result()
    }

    /// Only roles the registry grants something to may be assigned.
    fn check_assignable(&self, role: &Role) -> StewardResult<()> {
        if self.registry.permission(role).is_none() {
            return Err(StewardError::validation(
                "role",
                format!("`{role}` is not an assignable role"),
            ));
        }
        Ok(())
    }

    pub async fn create_user(
        &self,
        actor: Option<&Role>,
        input: CreateUserProfile,
    ) -> StewardResult<UserProfile> {
        self.authorize(actor)?;
        if input.email.trim().is_empty() {
            return Err(StewardError::validation("email", "email is required"));
        }
        self.check_assignable(&input.role)?;
        self.repo.create(input).await
    }

    pub async fn assign_role(
        &self,
        actor: Option<&Role>,
        user_id: Uuid,
        role: Role,
    ) -> StewardResult<UserProfile> {
        self.authorize(actor)?;
        self.check_assignable(&role)?;
        let user = self.repo.set_role(user_id, role).await?;
        info!(user_id = %user.id, role = %user.role, "Role assigned");
        Ok(user)
    }

    pub async fn list_users(
        &self,
        actor: Option<&Role>,
        pagination: Pagination,
    ) -> StewardResult<PaginatedResult<UserProfile>> {
        self.authorize(actor)?;
        self.repo.list(pagination).await
    }

    pub async fn delete_user(&self, actor: Option<&Role>, id: Uuid) -> StewardResult<()> {
        self.authorize(actor)?;
        self.repo.delete(id).await
    }
}
