//! SurrealDB implementation of [`UserProfileRepository`].

use chrono::{DateTime, Utc};
use steward_core::error::{StewardError, StewardResult};
use steward_core::models::role::Role;
use steward_core::models::user::{CreateUserProfile, UserProfile};
use steward_core::repository::{PaginatedResult, Pagination, UserProfileRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, parse_uuid};
use crate::error::DbError;

const ENTITY: &str = "user_profile";

#[derive(Debug, SurrealValue)]
struct UserProfileRow {
    email: String,
    display_name: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct UserProfileRowWithId {
    record_id: String,
    email: String,
    display_name: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserProfileRow {
    fn into_profile(self, id: Uuid) -> UserProfile {
        UserProfile {
            id,
            email: self.email,
            display_name: self.display_name,
            role: Role::parse(&self.role),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl UserProfileRowWithId {
    fn try_into_profile(self) -> Result<UserProfile, DbError> {
        let id = parse_uuid(ENTITY, &self.record_id)?;
        Ok(UserProfileRow {
            email: self.email,
            display_name: self.display_name,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_profile(id))
    }
}

/// Emails are matched case-insensitively; store them lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The schema only admits recognized roles; catch unknown ones before the
/// round trip so the caller gets a field-level error.
fn known_role(role: &Role) -> StewardResult<&str> {
    if role.is_known() {
        Ok(role.as_str())
    } else {
        Err(StewardError::validation(
            "role",
            format!("`{role}` is not a recognized role"),
        ))
    }
}

/// SurrealDB implementation of the UserProfile repository.
#[derive(Clone)]
pub struct SurrealUserProfileRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserProfileRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserProfileRepository for SurrealUserProfileRepository<C> {
    async fn create(&self, input: CreateUserProfile) -> StewardResult<UserProfile> {
        let role = known_role(&input.role)?.to_string();
        let email = normalize_email(&input.email);

        let mut existing = self
            .db
            .query("SELECT count() AS total FROM user_profile WHERE email = $email GROUP ALL")
            .bind(("email", email.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = existing.take(0).map_err(DbError::from)?;
        if count_rows.first().is_some_and(|r| r.total > 0) {
            return Err(StewardError::AlreadyExists {
                entity: ENTITY.into(),
            });
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('user_profile', $id) SET \
                 email = $email, display_name = $display_name, \
                 role = $role",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", email))
            .bind(("display_name", input.display_name))
            .bind(("role", role))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_profile(id))
    }

    async fn get_by_id(&self, id: Uuid) -> StewardResult<UserProfile> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('user_profile', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_profile(id))
    }

    async fn get_by_email(&self, email: &str) -> StewardResult<UserProfile> {
        let email = normalize_email(email);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user_profile \
                 WHERE email = $email",
            )
            .bind(("email", email.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserProfileRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: email,
        })?;

        Ok(row.try_into_profile()?)
    }

    async fn list(&self, pagination: Pagination) -> StewardResult<PaginatedResult<UserProfile>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM user_profile GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user_profile \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserProfileRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(UserProfileRowWithId::try_into_profile)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn set_role(&self, id: Uuid, role: Role) -> StewardResult<UserProfile> {
        let role = known_role(&role)?.to_string();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('user_profile', $id) SET \
                 role = $role, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("role", role))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserProfileRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_profile(id))
    }

    async fn delete(&self, id: Uuid) -> StewardResult<()> {
        self.db
            .query("DELETE type::record('user_profile', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }
}
