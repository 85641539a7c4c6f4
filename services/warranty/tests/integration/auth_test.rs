use warranty_auth_types::token::{TokenKey, validate_access_token};
use warranty_domain::user::UserRole;
use warranty_service::error::WarrantyServiceError;
use warranty_service::usecase::auth::{
    ChangePasswordUseCase, IssueTemporaryPasswordUseCase, LoginInput, LoginUseCase,
    SeedAdminUseCase,
};
use warranty_testing::auth::MockAuth;

use crate::helpers::{MockDb, TEST_JWT_SECRET, seed_user};

fn login_usecase(db: &MockDb) -> LoginUseCase<MockDb> {
    LoginUseCase {
        repo: db.clone(),
        token_key: TokenKey::new(TEST_JWT_SECRET),
    }
}

async fn login(db: &MockDb, email: &str, password: &str) -> Result<String, WarrantyServiceError> {
    login_usecase(db)
        .execute(LoginInput {
            email: email.to_owned(),
            password: password.to_owned(),
        })
        .await
        .map(|output| output.token)
}

// ── SeedAdmin + Login ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_log_in_seeded_admin_with_admin_role_in_token() {
    let db = MockDb::default();
    let seeded = SeedAdminUseCase { repo: db.clone() }
        .execute("admin@example.com", "admin123".to_owned())
        .await
        .unwrap();
    assert!(seeded);

    let output = login_usecase(&db)
        .execute(LoginInput {
            email: "admin@example.com".to_owned(),
            password: "admin123".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(output.user.role, UserRole::Admin);
    let identity = validate_access_token(&output.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(identity.role, UserRole::Admin);
    assert_eq!(identity.user_id, output.user.id);
    assert_eq!(identity.email, "admin@example.com");
    assert!(identity.is_admin());
}

#[tokio::test]
async fn should_not_overwrite_existing_admin_on_reseed() {
    let db = MockDb::default();
    let seed = SeedAdminUseCase { repo: db.clone() };
    assert!(seed.execute("admin@example.com", "admin123".to_owned()).await.unwrap());
    assert!(!seed.execute("admin@example.com", "changed".to_owned()).await.unwrap());

    assert!(login(&db, "admin@example.com", "admin123").await.is_ok());
    assert_eq!(db.tables.lock().unwrap().users.len(), 1);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let db = MockDb::default();
    seed_user(&db, "cust@example.com", "right", UserRole::Customer).await;

    let result = login(&db, "cust@example.com", "wrong").await;
    assert!(
        matches!(result, Err(WarrantyServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_email_with_same_error() {
    let db = MockDb::default();
    let result = login(&db, "ghost@example.com", "whatever").await;
    assert!(matches!(result, Err(WarrantyServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_match_email_case_sensitively() {
    let db = MockDb::default();
    seed_user(&db, "cust@example.com", "pw", UserRole::Customer).await;
    let result = login(&db, "Cust@Example.com", "pw").await;
    assert!(matches!(result, Err(WarrantyServiceError::InvalidCredentials)));
}

// ── ChangePassword ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_change_password_of_token_holder() {
    let db = MockDb::default();
    let user = seed_user(&db, "cust@example.com", "old", UserRole::Customer).await;
    let auth = MockAuth::new(user.id, &user.email, user.role);

    ChangePasswordUseCase { repo: db.clone() }
        .execute(&auth.identity, "new-secret".to_owned())
        .await
        .unwrap();

    assert!(login(&db, "cust@example.com", "new-secret").await.is_ok());
    assert!(matches!(
        login(&db, "cust@example.com", "old").await,
        Err(WarrantyServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_fail_change_password_for_deleted_account() {
    let db = MockDb::default();
    let auth = MockAuth::customer("gone@example.com");
    let result = ChangePasswordUseCase { repo: db.clone() }
        .execute(&auth.identity, "x".to_owned())
        .await;
    assert!(matches!(result, Err(WarrantyServiceError::UserNotFound)));
}

// ── IssueTemporaryPassword ───────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_temp_password_for_own_email() {
    let db = MockDb::default();
    let user = seed_user(&db, "cust@example.com", "old", UserRole::Customer).await;
    let auth = MockAuth::new(user.id, &user.email, user.role);

    let temp = IssueTemporaryPasswordUseCase { repo: db.clone() }
        .execute(&auth.identity, "cust@example.com")
        .await
        .unwrap();

    assert_eq!(temp.len(), 12);
    let stored = db.user_by_email("cust@example.com").unwrap();
    assert_ne!(stored.password_hash, temp);
    assert!(login(&db, "cust@example.com", &temp).await.is_ok());
}

#[tokio::test]
async fn should_forbid_customer_resetting_someone_else() {
    let db = MockDb::default();
    seed_user(&db, "victim@example.com", "pw", UserRole::Customer).await;
    let attacker = MockAuth::customer("attacker@example.com");

    let result = IssueTemporaryPasswordUseCase { repo: db.clone() }
        .execute(&attacker.identity, "victim@example.com")
        .await;
    assert!(matches!(result, Err(WarrantyServiceError::Forbidden)));
    assert!(login(&db, "victim@example.com", "pw").await.is_ok());
}

#[tokio::test]
async fn should_let_admin_reset_any_existing_account() {
    let db = MockDb::default();
    seed_user(&db, "cust@example.com", "pw", UserRole::Customer).await;
    let usecase = IssueTemporaryPasswordUseCase { repo: db.clone() };

    let temp = usecase
        .execute(&MockAuth::admin().identity, "cust@example.com")
        .await
        .unwrap();
    assert!(login(&db, "cust@example.com", &temp).await.is_ok());

    let missing = usecase
        .execute(&MockAuth::admin().identity, "nobody@example.com")
        .await;
    assert!(matches!(missing, Err(WarrantyServiceError::UserNotFound)));
}
