//! Integration tests for sign-in and the role guards, backed by an
//! in-memory user repository.

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use tourhub_auth::{AccessControl, AuthConfig, AuthError, IdentityClaims};
use tourhub_core::error::TourError;
use tourhub_core::models::role::Role;
use tourhub_core::models::user::{CreateUser, UpdateUser};
use tourhub_core::repository::UserRepository;
use tourhub_db::repository::SurrealUserRepository;

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "access-control-test-secret".into(),
        ..Default::default()
    }
}

async fn setup() -> (AccessControl<SurrealUserRepository<Db>>, SurrealUserRepository<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tourhub_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db);
    (AccessControl::new(users.clone(), test_config()), users)
}

async fn register(users: &SurrealUserRepository<Db>, email: &str, role: Option<Role>) {
    users
        .create(CreateUser {
            email: email.into(),
            name: "Test".into(),
            photo_url: None,
            role,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn sign_in_then_authenticate() {
    let (access, _) = setup().await;

    let mut claims = IdentityClaims::new("  t@x.com ");
    claims.name = Some("Tess".into());
    let grant = access.sign_in(claims).unwrap();
    assert_eq!(grant.expires_in, 86_400);

    let identity = access.authenticate(Some(&grant.token)).unwrap();
    assert_eq!(identity.email(), "t@x.com");
    assert_eq!(identity.name(), Some("Tess"));
}

#[tokio::test]
async fn sign_in_requires_email() {
    let (access, _) = setup().await;

    let err = access.sign_in(IdentityClaims::new("   ")).unwrap_err();
    assert!(matches!(err, AuthError::InvalidClaims(_)));
}

#[tokio::test]
async fn authenticate_without_token_fails() {
    let (access, _) = setup().await;

    assert!(matches!(
        access.authenticate(None).unwrap_err(),
        AuthError::TokenMissing
    ));
    assert!(matches!(
        access.authenticate(Some("not-a-jwt")).unwrap_err(),
        AuthError::TokenInvalid(_)
    ));
}

#[tokio::test]
async fn guide_guard_allows_guides() {
    let (access, users) = setup().await;
    register(&users, "g@x.com", Some(Role::Guide)).await;

    let grant = access.sign_in(IdentityClaims::new("g@x.com")).unwrap();
    let identity = access.authenticate(Some(&grant.token)).unwrap();

    let authorized = access.require_guide(identity).await.unwrap();
    assert_eq!(authorized.role(), Role::Guide);
    assert_eq!(authorized.email(), "g@x.com");
    assert!(authorized.user_id().is_some());
}

#[tokio::test]
async fn role_mismatch_is_denied() {
    let (access, users) = setup().await;
    register(&users, "t@x.com", None).await;

    let grant = access.sign_in(IdentityClaims::new("t@x.com")).unwrap();
    let identity = access.authenticate(Some(&grant.token)).unwrap();

    let err = access.require_admin(identity).await.unwrap_err();
    assert!(matches!(err, TourError::AuthorizationDenied { .. }));
}

#[tokio::test]
async fn unregistered_email_counts_as_tourist() {
    let (access, _) = setup().await;

    let grant = access.sign_in(IdentityClaims::new("ghost@x.com")).unwrap();

    let identity = access.authenticate(Some(&grant.token)).unwrap();
    let err = access.require_guide(identity).await.unwrap_err();
    assert!(matches!(err, TourError::AuthorizationDenied { .. }));

    let identity = access.authenticate(Some(&grant.token)).unwrap();
    let authorized = access.require_role(identity, Role::Tourist).await.unwrap();
    assert!(authorized.user().is_none());
}

#[tokio::test]
async fn role_change_applies_to_existing_session() {
    let (access, users) = setup().await;
    register(&users, "a@x.com", Some(Role::Tourist)).await;

    let grant = access.sign_in(IdentityClaims::new("a@x.com")).unwrap();

    let identity = access.authenticate(Some(&grant.token)).unwrap();
    assert!(access.require_admin(identity).await.is_err());

    let user = users.get_by_email("a@x.com").await.unwrap();
    users
        .update(
            user.id,
            UpdateUser {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Same token, no re-sign-in.
    let identity = access.authenticate(Some(&grant.token)).unwrap();
    let authorized = access.require_admin(identity).await.unwrap();
    assert_eq!(authorized.role(), Role::Admin);
}
