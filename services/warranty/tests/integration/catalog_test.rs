use rust_decimal::Decimal;
use serde::Deserialize;

use warranty_service::domain::repository::CatalogRepository;
use warranty_service::error::WarrantyServiceError;
use warranty_service::usecase::catalog::{
    CreateCatalogProductInput, CreateCatalogProductUseCase, DeleteCatalogProductUseCase,
    ListCatalogUseCase, ListShippedProductsUseCase,
};
use warranty_testing::fixture::Fixture;

use crate::helpers::{MockDb, register};

#[derive(Deserialize)]
struct CatalogSeed {
    sales_order_number: String,
    product_name: String,
    part_number: Option<String>,
    serial_number: String,
    shipped_to_customer_name: Option<String>,
    net_quantity: Option<i32>,
    unit_price: Option<Decimal>,
    total_amount: Option<Decimal>,
}

async fn seeded() -> MockDb {
    let db = MockDb::default();
    let usecase = CreateCatalogProductUseCase { repo: db.clone() };
    for seed in Fixture::load::<Vec<CatalogSeed>>("catalog.json") {
        usecase
            .execute(CreateCatalogProductInput {
                sales_order_number: seed.sales_order_number,
                product_name: seed.product_name,
                part_number: seed.part_number,
                serial_number: seed.serial_number,
                shipped_to_customer_name: seed.shipped_to_customer_name,
                net_quantity: seed.net_quantity,
                unit_price: seed.unit_price,
                total_amount: seed.total_amount,
                ..Default::default()
            })
            .await
            .unwrap();
    }
    db
}

#[tokio::test]
async fn should_list_catalog_in_insertion_order() {
    let db = seeded().await;
    let products = ListCatalogUseCase { repo: db.clone() }.execute().await.unwrap();

    let serials: Vec<&str> = products.iter().map(|p| p.serial_number.as_str()).collect();
    assert_eq!(serials, ["AIS4U-0001", "AIS4U-0002", "EDGE1U-0310"]);
    assert_eq!(products[0].unit_price, Some(Decimal::new(124_999_900, 2)));
    assert!(products[2].part_number.is_none());

    let shipped = ListShippedProductsUseCase { repo: db.clone() }
        .execute()
        .await
        .unwrap();
    assert_eq!(shipped.len(), 3);
}

#[tokio::test]
async fn should_make_new_entry_registrable() {
    let db = seeded().await;
    assert!(db.exists("Edge Node 1U", "EDGE1U-0310").await.unwrap());

    let output = register(&db, "buyer@acme.io", &[("Edge Node 1U", "EDGE1U-0310", "")]).await;
    assert_eq!(output.inserted, 1);
}

#[tokio::test]
async fn should_return_deleted_entry() {
    let db = seeded().await;
    let usecase = DeleteCatalogProductUseCase { repo: db.clone() };

    let deleted = usecase.execute("AIS4U-0002").await.unwrap();
    assert_eq!(deleted.product_name, "AI Server 4U");
    assert_eq!(deleted.sales_order_number, "SO-240118");
    assert!(!db.exists("AI Server 4U", "AIS4U-0002").await.unwrap());

    let again = usecase.execute("AIS4U-0002").await;
    assert!(matches!(
        again,
        Err(WarrantyServiceError::CatalogProductNotFound)
    ));
}

#[tokio::test]
async fn should_leave_registration_orphaned_after_catalog_delete() {
    let db = seeded().await;
    register(&db, "buyer@acme.io", &[("AI Server 4U", "AIS4U-0001", "AIS-4U-H100")]).await;

    DeleteCatalogProductUseCase { repo: db.clone() }
        .execute("AIS4U-0001")
        .await
        .unwrap();

    assert!(db.registration_by_serial("AIS4U-0001").is_some());
}
