//! Integration tests for the UserProfile repository using in-memory
//! SurrealDB, including role assignment through the admin service.

use std::sync::Arc;

use steward_core::error::StewardError;
use steward_core::models::role::Role;
use steward_core::models::user::CreateUserProfile;
use steward_core::registry::RoleRegistry;
use steward_core::repository::{Pagination, UserProfileRepository};
use steward_core::services::UserAdminService;
use steward_db::repository::SurrealUserProfileRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> SurrealUserProfileRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    steward_db::run_migrations(&db).await.unwrap();
    SurrealUserProfileRepository::new(db)
}

fn profile(email: &str, role: Role) -> CreateUserProfile {
    CreateUserProfile {
        email: email.into(),
        display_name: "Priscilla".into(),
        role,
    }
}

#[tokio::test]
async fn create_and_lookup_profile() {
    let repo = setup().await;
    let user = repo
        .create(profile("Priscilla@Example.com ", Role::EventsManager))
        .await
        .unwrap();
    assert_eq!(user.email, "priscilla@example.com");
    assert_eq!(user.role, Role::EventsManager);

    let by_id = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(by_id.email, user.email);

    let by_email = repo.get_by_email("PRISCILLA@example.com").await.unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let repo = setup().await;
    repo.create(profile("aquila@example.com", Role::Member))
        .await
        .unwrap();
    let err = repo
        .create(profile("aquila@example.com", Role::Admin))
        .await
        .unwrap_err();
    assert!(matches!(err, StewardError::AlreadyExists { .. }));
}

#[tokio::test]
async fn unknown_role_never_reaches_the_store() {
    let repo = setup().await;
    let err = repo
        .create(profile("silas@example.com", Role::parse("bishop")))
        .await
        .unwrap_err();
    assert!(matches!(err, StewardError::Validation { ref field, .. } if field == "role"));
}

#[tokio::test]
async fn set_role_changes_only_the_role() {
    let repo = setup().await;
    let user = repo
        .create(profile("timothy@example.com", Role::Member))
        .await
        .unwrap();

    let updated = repo.set_role(user.id, Role::ResourceManager).await.unwrap();
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.role, Role::ResourceManager);
    assert_eq!(updated.email, user.email);
    assert!(updated.updated_at >= user.updated_at);
}

#[tokio::test]
async fn set_role_on_missing_user_is_not_found() {
    let repo = setup().await;
    let err = repo.set_role(Uuid::new_v4(), Role::Admin).await.unwrap_err();
    assert!(matches!(err, StewardError::NotFound { .. }));
}

#[tokio::test]
async fn admin_service_over_surreal() {
    let repo = setup().await;
    let service = UserAdminService::new(repo.clone(), Arc::new(RoleRegistry::builtin()));

    let user = service
        .create_user(Some(&Role::Admin), profile("titus@example.com", Role::Member))
        .await
        .unwrap();
    let err = service
        .assign_role(Some(&Role::FinanceManager), user.id, Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, StewardError::AuthorizationDenied { .. }));
    assert_eq!(repo.get_by_id(user.id).await.unwrap().role, Role::Member);

    service
        .assign_role(Some(&Role::Admin), user.id, Role::FinanceManager)
        .await
        .unwrap();
    assert_eq!(
        repo.get_by_id(user.id).await.unwrap().role,
        Role::FinanceManager
    );

    let page = service
        .list_users(Some(&Role::Admin), Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}
