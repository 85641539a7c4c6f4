use chrono::Utc;
use uuid::Uuid;

use warranty_auth_types::token::TokenKey;
use warranty_domain::claim::RegisteredForClaim;
use warranty_domain::user::UserRole;
use warranty_service::domain::types::User;
use warranty_service::error::WarrantyServiceError;
use warranty_service::usecase::auth::{LoginInput, LoginUseCase};
use warranty_service::usecase::registration::{
    ListAllRegistrationsUseCase, ListUserRegistrationsUseCase,
};
use warranty_testing::auth::MockAuth;

use crate::helpers::{
    MockDb, MockInvoiceStore, TEST_JWT_SECRET, catalog_product, register, registration_input,
    registration_usecase, seed_user,
};

fn seeded_catalog() -> MockDb {
    MockDb::with_catalog(vec![
        catalog_product("Server X", "SN1"),
        catalog_product("Server X", "SN2"),
        catalog_product("Switch Y", "SN3"),
    ])
}

// ── SubmitRegistration ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_provision_new_customer_who_can_then_log_in() {
    let db = seeded_catalog();
    let output = register(&db, "new@x.com", &[("Server X", "SN1", "P-1")]).await;

    assert_eq!(output.inserted, 1);
    assert!(output.receipt.is_none());
    let temp_password = output.temp_password.expect("new account gets a temp password");

    let user = db.user_by_email("new@x.com").unwrap();
    assert_eq!(user.role, UserRole::Customer);
    assert_eq!(user.country_code.as_deref(), Some("IN"));
    assert_ne!(user.password_hash, temp_password);

    let login = LoginUseCase {
        repo: db.clone(),
        token_key: TokenKey::new(TEST_JWT_SECRET),
    }
    .execute(LoginInput {
        email: "new@x.com".to_owned(),
        password: temp_password,
    })
    .await
    .unwrap();
    assert_eq!(login.user.id, user.id);
}

#[tokio::test]
async fn should_reuse_existing_account_without_temp_password() {
    let db = seeded_catalog();
    let existing = seed_user(&db, "known@x.com", "pw", UserRole::Customer).await;

    let output = register(&db, "known@x.com", &[("Server X", "SN1", "P-1")]).await;

    assert!(output.temp_password.is_none());
    assert_eq!(db.registration_by_serial("SN1").unwrap().user_id, existing.id);
    assert_eq!(db.tables.lock().unwrap().users.len(), 1);
}

#[tokio::test]
async fn should_fall_back_to_account_created_by_concurrent_submission() {
    let db = seeded_catalog();
    let racer = User {
        id: Uuid::now_v7(),
        name: Some("Racer".to_owned()),
        email: "race@x.com".to_owned(),
        mobile_number: None,
        password_hash: "racer-hash".to_owned(),
        country_code: None,
        role: UserRole::Customer,
        registered_at: Utc::now(),
    };
    db.tables.lock().unwrap().racing_user = Some(racer.clone());

    let output = register(&db, "race@x.com", &[("Server X", "SN1", "P-1")]).await;

    assert_eq!(output.inserted, 1);
    assert!(output.temp_password.is_none());
    assert_eq!(db.registration_by_serial("SN1").unwrap().user_id, racer.id);
    let users = db.tables.lock().unwrap().users.clone();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].password_hash, "racer-hash");
}

#[tokio::test]
async fn should_insert_one_row_per_product_in_batch() {
    let db = seeded_catalog();
    let output = register(
        &db,
        "new@x.com",
        &[("Server X", "SN1", "P-1"), ("Switch Y", "SN3", "P-3")],
    )
    .await;

    assert_eq!(output.inserted, 2);
    let sn3 = db.registration_by_serial("SN3").unwrap();
    assert_eq!(sn3.part_number, "P-3");
    assert_eq!(sn3.registered_for_claim, RegisteredForClaim::No);
}

#[tokio::test]
async fn should_reject_unknown_catalog_pair_naming_it() {
    let db = seeded_catalog();
    let result = registration_usecase(&db, &MockInvoiceStore::default())
        .execute(registration_input(
            "new@x.com",
            &[("Server X", "SN1", "P-1"), ("Server X", "SN3", "P-3")],
            None,
        ))
        .await;

    match result {
        Err(WarrantyServiceError::ProductNotFound {
            product_name,
            serial_number,
        }) => {
            assert_eq!(product_name, "Server X");
            assert_eq!(serial_number, "SN3");
        }
        other => panic!("expected ProductNotFound, got {other:?}"),
    }
    assert!(db.user_by_email("new@x.com").is_none());
    assert!(db.registration_by_serial("SN1").is_none());
}

#[tokio::test]
async fn should_reject_second_registration_of_same_serial() {
    let db = seeded_catalog();
    register(&db, "first@x.com", &[("Server X", "SN1", "P-1")]).await;

    let result = registration_usecase(&db, &MockInvoiceStore::default())
        .execute(registration_input("second@x.com", &[("Server X", "SN1", "P-1")], None))
        .await;

    assert!(
        matches!(
            result,
            Err(WarrantyServiceError::AlreadyRegistered { ref serial_number, .. }) if serial_number == "SN1"
        ),
        "expected AlreadyRegistered, got {result:?}"
    );
    assert!(db.user_by_email("second@x.com").is_none());
}

#[tokio::test]
async fn should_reject_serial_repeated_within_one_batch() {
    let db = seeded_catalog();
    let result = registration_usecase(&db, &MockInvoiceStore::default())
        .execute(registration_input(
            "new@x.com",
            &[("Server X", "SN1", "P-1"), ("Server X", "SN1", "P-1")],
            None,
        ))
        .await;
    assert!(matches!(
        result,
        Err(WarrantyServiceError::AlreadyRegistered { .. })
    ));
}

#[tokio::test]
async fn should_reject_mismatched_arrays() {
    let db = seeded_catalog();
    let mut input = registration_input("new@x.com", &[("Server X", "SN1", "P-1")], None);
    input.part_numbers.clear();

    let result = registration_usecase(&db, &MockInvoiceStore::default())
        .execute(input)
        .await;
    assert!(matches!(result, Err(WarrantyServiceError::Validation(_))));
}

#[tokio::test]
async fn should_reject_empty_batch_and_bad_email() {
    let db = seeded_catalog();
    let usecase = registration_usecase(&db, &MockInvoiceStore::default());

    let empty = usecase
        .execute(registration_input("new@x.com", &[], None))
        .await;
    assert!(matches!(empty, Err(WarrantyServiceError::Validation(_))));

    let bad_email = usecase
        .execute(registration_input("not-an-email", &[("Server X", "SN1", "P-1")], None))
        .await;
    assert!(matches!(bad_email, Err(WarrantyServiceError::Validation(_))));
}

#[tokio::test]
async fn should_attach_same_invoice_key_to_every_row() {
    let db = seeded_catalog();
    let store = MockInvoiceStore::default();

    let output = registration_usecase(&db, &store)
        .execute(registration_input(
            "new@x.com",
            &[("Server X", "SN1", "P-1"), ("Server X", "SN2", "P-2")],
            Some(b"%PDF-1.4 invoice".as_slice()),
        ))
        .await
        .unwrap();

    let user = db.user_by_email("new@x.com").unwrap();
    let key = output.receipt.unwrap();
    assert!(key.starts_with("invoices/"));
    assert!(key.ends_with(&format!("_{}_SN1", user.id)));
    assert_eq!(store.keys(), vec![key.clone()]);
    for serial in ["SN1", "SN2"] {
        let row = db.registration_by_serial(serial).unwrap();
        assert_eq!(row.invoice_receipt.as_deref(), Some(key.as_str()));
    }
}

#[tokio::test]
async fn should_remove_uploaded_invoice_when_insert_fails() {
    let db = seeded_catalog();
    let store = MockInvoiceStore::default();
    db.tables.lock().unwrap().fail_next_batch = true;

    let result = registration_usecase(&db, &store)
        .execute(registration_input(
            "new@x.com",
            &[("Server X", "SN1", "P-1")],
            Some(b"%PDF-1.4 invoice".as_slice()),
        ))
        .await;

    assert!(matches!(result, Err(WarrantyServiceError::Internal(_))));
    assert!(store.keys().is_empty());
    assert!(db.user_by_email("new@x.com").is_none());
}

// ── ListUserRegistrations ────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_own_registrations_newest_first() {
    let db = seeded_catalog();
    register(&db, "new@x.com", &[("Server X", "SN1", "P-1")]).await;
    register(&db, "new@x.com", &[("Switch Y", "SN3", "P-3")]).await;
    let user = db.user_by_email("new@x.com").unwrap();
    let auth = MockAuth::new(user.id, &user.email, user.role);

    let listings = ListUserRegistrationsUseCase {
        users: db.clone(),
        registrations: db.clone(),
    }
    .execute(&auth.identity, "new@x.com")
    .await
    .unwrap();

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].serial_number, "SN3");
    assert_eq!(listings[1].serial_number, "SN1");
    assert_eq!(listings[0].email, "new@x.com");
}

#[tokio::test]
async fn should_forbid_listing_another_users_registrations() {
    let db = seeded_catalog();
    register(&db, "new@x.com", &[("Server X", "SN1", "P-1")]).await;
    let snoop = MockAuth::customer("snoop@x.com");

    let result = ListUserRegistrationsUseCase {
        users: db.clone(),
        registrations: db.clone(),
    }
    .execute(&snoop.identity, "new@x.com")
    .await;
    assert!(matches!(result, Err(WarrantyServiceError::Forbidden)));
}

#[tokio::test]
async fn should_answer_not_found_when_user_has_no_registrations() {
    let db = seeded_catalog();
    let user = seed_user(&db, "empty@x.com", "pw", UserRole::Customer).await;
    let auth = MockAuth::new(user.id, &user.email, user.role);
    let usecase = ListUserRegistrationsUseCase {
        users: db.clone(),
        registrations: db.clone(),
    };

    let result = usecase.execute(&auth.identity, "empty@x.com").await;
    assert!(matches!(result, Err(WarrantyServiceError::NotFound(_))));

    let admin = MockAuth::admin();
    let unknown = usecase.execute(&admin.identity, "ghost@x.com").await;
    assert!(matches!(unknown, Err(WarrantyServiceError::UserNotFound)));
}

// ── ListAllRegistrations ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_every_registration_or_not_found() {
    let db = seeded_catalog();
    let usecase = ListAllRegistrationsUseCase {
        registrations: db.clone(),
    };
    assert!(matches!(
        usecase.execute().await,
        Err(WarrantyServiceError::NotFound(_))
    ));

    register(&db, "a@x.com", &[("Server X", "SN1", "P-1")]).await;
    register(&db, "b@x.com", &[("Server X", "SN2", "P-2")]).await;
    let listings = usecase.execute().await.unwrap();
    assert_eq!(listings.len(), 2);
}
