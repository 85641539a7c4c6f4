use warranty_auth_types::identity::Identity;
use warranty_domain::claim::{ClaimStatus, RegisteredForClaim};
use warranty_service::error::WarrantyServiceError;
use warranty_service::usecase::claim::{
    FileClaimInput, FileClaimUseCase, GetClaimUseCase, ListClaimsUseCase,
    UpdateClaimStatusUseCase,
};
use warranty_testing::auth::MockAuth;

use crate::helpers::{MockDb, catalog_product, register};

/// Catalog with SN1 registered by `owner@x.com`.
async fn registered() -> (MockDb, Identity) {
    let db = MockDb::with_catalog(vec![
        catalog_product("Server X", "SN1"),
        catalog_product("Server X", "SN2"),
    ]);
    register(&db, "owner@x.com", &[("Server X", "SN1", "P-1")]).await;
    let user = db.user_by_email("owner@x.com").unwrap();
    let identity = MockAuth::new(user.id, &user.email, user.role).identity;
    (db, identity)
}

fn file_usecase(db: &MockDb) -> FileClaimUseCase<MockDb, MockDb, MockDb> {
    FileClaimUseCase {
        users: db.clone(),
        registrations: db.clone(),
        claims: db.clone(),
    }
}

fn status_usecase(db: &MockDb) -> UpdateClaimStatusUseCase<MockDb, MockDb> {
    UpdateClaimStatusUseCase {
        registrations: db.clone(),
        claims: db.clone(),
    }
}

fn claim_input(serial: &str) -> FileClaimInput {
    FileClaimInput {
        serial_number: serial.to_owned(),
        customer_remarks: Some("fan is noisy".to_owned()),
    }
}

// ── FileClaim ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_file_pending_claim_and_flag_registration() {
    let (db, owner) = registered().await;

    let id = file_usecase(&db)
        .execute(&owner, claim_input("SN1"))
        .await
        .unwrap();

    let tables = db.tables.lock().unwrap();
    let claim = tables.claims.iter().find(|c| c.id == id).unwrap();
    assert_eq!(claim.claim_status, ClaimStatus::Pending);
    assert_eq!(claim.customer_remarks.as_deref(), Some("fan is noisy"));
    let registration = tables
        .registrations
        .iter()
        .find(|r| r.serial_number == "SN1")
        .unwrap();
    assert_eq!(claim.registration_id, registration.id);
    assert_eq!(registration.registered_for_claim, RegisteredForClaim::Yes);
}

#[tokio::test]
async fn should_reject_second_claim_for_same_registration() {
    let (db, owner) = registered().await;
    let usecase = file_usecase(&db);
    usecase.execute(&owner, claim_input("SN1")).await.unwrap();

    let result = usecase.execute(&owner, claim_input("SN1")).await;
    assert!(
        matches!(result, Err(WarrantyServiceError::DuplicateClaim)),
        "expected DuplicateClaim, got {result:?}"
    );
    assert_eq!(db.claim_count(), 1);
}

#[tokio::test]
async fn should_reject_claim_on_unregistered_serial() {
    let (db, owner) = registered().await;
    let result = file_usecase(&db).execute(&owner, claim_input("SN2")).await;
    assert!(matches!(result, Err(WarrantyServiceError::RegistrationNotFound)));
}

#[tokio::test]
async fn should_not_let_customer_claim_someone_elses_product() {
    let (db, _owner) = registered().await;
    register(&db, "other@x.com", &[("Server X", "SN2", "P-2")]).await;
    let other = db.user_by_email("other@x.com").unwrap();
    let other = MockAuth::new(other.id, &other.email, other.role).identity;

    let result = file_usecase(&db).execute(&other, claim_input("SN1")).await;
    assert!(matches!(result, Err(WarrantyServiceError::RegistrationNotFound)));
}

// ── UpdateClaimStatus ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_apply_same_status_twice_without_error() {
    let (db, owner) = registered().await;
    file_usecase(&db).execute(&owner, claim_input("SN1")).await.unwrap();
    let usecase = status_usecase(&db);

    assert_eq!(
        usecase.execute("SN1", "Approved").await.unwrap(),
        ClaimStatus::Approved
    );
    assert_eq!(
        usecase.execute("SN1", "Approved").await.unwrap(),
        ClaimStatus::Approved
    );
    let tables = db.tables.lock().unwrap();
    assert_eq!(tables.claims[0].claim_status, ClaimStatus::Approved);
}

#[tokio::test]
async fn should_refuse_leaving_terminal_status() {
    let (db, owner) = registered().await;
    file_usecase(&db).execute(&owner, claim_input("SN1")).await.unwrap();
    let usecase = status_usecase(&db);
    usecase.execute("SN1", "Rejected").await.unwrap();

    let result = usecase.execute("SN1", "Pending").await;
    assert!(matches!(
        result,
        Err(WarrantyServiceError::InvalidStatusTransition {
            from: ClaimStatus::Rejected,
            to: ClaimStatus::Pending,
        })
    ));
}

#[tokio::test]
async fn should_validate_status_name() {
    let (db, owner) = registered().await;
    file_usecase(&db).execute(&owner, claim_input("SN1")).await.unwrap();
    let result = status_usecase(&db).execute("SN1", "Closed").await;
    assert!(matches!(result, Err(WarrantyServiceError::Validation(_))));
}

#[tokio::test]
async fn should_distinguish_missing_registration_from_missing_claim() {
    let (db, _owner) = registered().await;
    let usecase = status_usecase(&db);

    let no_registration = usecase.execute("SN-404", "Approved").await;
    assert!(matches!(
        no_registration,
        Err(WarrantyServiceError::RegistrationNotFound)
    ));

    let no_claim = usecase.execute("SN1", "Approved").await;
    assert!(matches!(no_claim, Err(WarrantyServiceError::ClaimNotFound)));
}

// ── GetClaim / ListClaims ────────────────────────────────────────────────────

#[tokio::test]
async fn should_show_claim_to_owner_and_admin_only() {
    let (db, owner) = registered().await;
    file_usecase(&db).execute(&owner, claim_input("SN1")).await.unwrap();
    let usecase = GetClaimUseCase { claims: db.clone() };

    let view = usecase.execute(&owner, "SN1").await.unwrap();
    assert_eq!(view.email, "owner@x.com");
    assert_eq!(view.claim_status, ClaimStatus::Pending);
    assert_eq!(view.registered_for_claim, RegisteredForClaim::Yes);

    assert!(usecase.execute(&MockAuth::admin().identity, "SN1").await.is_ok());

    let stranger = MockAuth::customer("stranger@x.com");
    let result = usecase.execute(&stranger.identity, "SN1").await;
    assert!(matches!(result, Err(WarrantyServiceError::Forbidden)));
}

#[tokio::test]
async fn should_report_missing_claim_view() {
    let (db, owner) = registered().await;
    let result = GetClaimUseCase { claims: db.clone() }
        .execute(&owner, "SN1")
        .await;
    assert!(matches!(result, Err(WarrantyServiceError::ClaimNotFound)));
}

#[tokio::test]
async fn should_list_claims_or_not_found() {
    let (db, owner) = registered().await;
    let usecase = ListClaimsUseCase { claims: db.clone() };
    assert!(matches!(
        usecase.execute().await,
        Err(WarrantyServiceError::NotFound(_))
    ));

    file_usecase(&db).execute(&owner, claim_input("SN1")).await.unwrap();
    let claims = usecase.execute().await.unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].serial_number, "SN1");
}
