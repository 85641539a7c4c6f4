use warranty_domain::user::UserRole;
use warranty_service::error::WarrantyServiceError;
use warranty_service::infra::storage::LocalInvoiceStore;
use warranty_service::usecase::invoice::DownloadInvoiceUseCase;
use warranty_service::usecase::registration::SubmitRegistrationUseCase;
use warranty_testing::auth::MockAuth;

use crate::helpers::{
    MockDb, MockInvoiceStore, catalog_product, read_body, register, registration_input,
    registration_usecase,
};

const PDF: &[u8] = b"%PDF-1.7\n1 0 obj << /Type /Catalog >> endobj\ntrailer\n%%EOF\n";

fn catalog() -> MockDb {
    MockDb::with_catalog(vec![
        catalog_product("Server X", "SN1"),
        catalog_product("Server X", "SN2"),
    ])
}

fn owner_of(db: &MockDb, email: &str) -> MockAuth {
    let user = db.user_by_email(email).unwrap();
    MockAuth::new(user.id, &user.email, UserRole::Customer)
}

#[tokio::test]
async fn should_download_uploaded_invoice_byte_for_byte() {
    let db = catalog();
    let store = MockInvoiceStore::default();
    let output = registration_usecase(&db, &store)
        .execute(registration_input("owner@x.com", &[("Server X", "SN1", "P-1")], Some(PDF)))
        .await
        .unwrap();
    let key = output.receipt.unwrap();
    let owner = owner_of(&db, "owner@x.com");

    let download = DownloadInvoiceUseCase {
        registrations: db.clone(),
        store: store.clone(),
    }
    .execute(&owner.identity, "SN1")
    .await
    .unwrap();

    let basename = key.rsplit('/').next().unwrap();
    assert_eq!(download.filename, format!("{basename}.pdf"));
    assert_eq!(download.object.content_length, Some(PDF.len() as u64));
    assert_eq!(read_body(download.object).await, PDF);
}

#[tokio::test]
async fn should_round_trip_through_local_filesystem_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalInvoiceStore::new(dir.path().to_path_buf());
    let db = catalog();

    SubmitRegistrationUseCase {
        users: db.clone(),
        catalog: db.clone(),
        registrations: db.clone(),
        store: store.clone(),
    }
    .execute(registration_input("owner@x.com", &[("Server X", "SN1", "P-1")], Some(PDF)))
    .await
    .unwrap();

    let download = DownloadInvoiceUseCase {
        registrations: db.clone(),
        store,
    }
    .execute(&MockAuth::admin().identity, "SN1")
    .await
    .unwrap();
    assert_eq!(read_body(download.object).await, PDF);
}

#[tokio::test]
async fn should_report_missing_invoice_for_registration_without_upload() {
    let db = catalog();
    register(&db, "owner@x.com", &[("Server X", "SN1", "P-1")]).await;
    let owner = owner_of(&db, "owner@x.com");
    let usecase = DownloadInvoiceUseCase {
        registrations: db.clone(),
        store: MockInvoiceStore::default(),
    };

    let no_key = usecase.execute(&owner.identity, "SN1").await;
    assert!(matches!(no_key, Err(WarrantyServiceError::InvoiceNotFound)));

    let unknown = usecase.execute(&owner.identity, "SN-404").await;
    assert!(matches!(unknown, Err(WarrantyServiceError::InvoiceNotFound)));
}

#[tokio::test]
async fn should_report_missing_invoice_when_object_is_gone() {
    let db = catalog();
    let store = MockInvoiceStore::default();
    registration_usecase(&db, &store)
        .execute(registration_input("owner@x.com", &[("Server X", "SN1", "P-1")], Some(PDF)))
        .await
        .unwrap();
    store.objects.lock().unwrap().clear();

    let result = DownloadInvoiceUseCase {
        registrations: db.clone(),
        store,
    }
    .execute(&owner_of(&db, "owner@x.com").identity, "SN1")
    .await;
    assert!(matches!(result, Err(WarrantyServiceError::InvoiceNotFound)));
}

#[tokio::test]
async fn should_forbid_downloading_someone_elses_invoice() {
    let db = catalog();
    let store = MockInvoiceStore::default();
    registration_usecase(&db, &store)
        .execute(registration_input("owner@x.com", &[("Server X", "SN1", "P-1")], Some(PDF)))
        .await
        .unwrap();

    let result = DownloadInvoiceUseCase {
        registrations: db.clone(),
        store,
    }
    .execute(&MockAuth::customer("other@x.com").identity, "SN1")
    .await;
    assert!(matches!(result, Err(WarrantyServiceError::Forbidden)));
}
