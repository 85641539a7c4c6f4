use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use warranty_auth_types::identity::AdminIdentity;

use crate::domain::types::CatalogProduct;
use crate::error::WarrantyServiceError;
use crate::handlers::{JsonBody, MessageResponse};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateCatalogProductInput, CreateCatalogProductUseCase, DeleteCatalogProductUseCase,
    ListCatalogUseCase, ListShippedProductsUseCase,
};

#[derive(Serialize)]
pub struct CatalogProductResponse {
    pub id: String,
    pub sales_order_number: String,
    pub product_name: String,
    pub part_number: Option<String>,
    pub serial_number: String,
    pub sold_to_party: Option<String>,
    pub shipped_to_customer_name: Option<String>,
    pub billing_date: Option<String>,
    pub billing_date_number: Option<String>,
    pub billing_type: Option<String>,
    pub net_quantity: Option<i32>,
    pub net_value_in_local_currency: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub net_tax: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub purchase_order_number: Option<String>,
    pub delivery_number: Option<String>,
    pub material_details: Option<String>,
    #[serde(serialize_with = "warranty_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<CatalogProduct> for CatalogProductResponse {
    fn from(p: CatalogProduct) -> Self {
        Self {
            id: p.id.to_string(),
            sales_order_number: p.sales_order_number,
            product_name: p.product_name,
            part_number: p.part_number,
            serial_number: p.serial_number,
            sold_to_party: p.sold_to_party,
            shipped_to_customer_name: p.shipped_to_customer_name,
            billing_date: p.billing_date,
            billing_date_number: p.billing_date_number,
            billing_type: p.billing_type,
            net_quantity: p.net_quantity,
            net_value_in_local_currency: p.net_value_in_local_currency,
            unit_price: p.unit_price,
            net_tax: p.net_tax,
            total_amount: p.total_amount,
            purchase_order_number: p.purchase_order_number,
            delivery_number: p.delivery_number,
            material_details: p.material_details,
            created_at: p.created_at,
        }
    }
}

// ── GET /products ────────────────────────────────────────────────────────────

pub async fn list_products(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogProductResponse>>, WarrantyServiceError> {
    let usecase = ListCatalogUseCase {
        repo: state.catalog_repo(),
    };
    let products = usecase.execute().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

// ── GET /shipped_products ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ShippedProductsResponse {
    pub registrations: Vec<CatalogProductResponse>,
}

pub async fn list_shipped_products(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<ShippedProductsResponse>, WarrantyServiceError> {
    let usecase = ListShippedProductsUseCase {
        repo: state.catalog_repo(),
    };
    let products = usecase.execute().await?;
    Ok(Json(ShippedProductsResponse {
        registrations: products.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /products ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub sales_order_number: String,
    #[serde(default)]
    pub product_name: String,
    pub part_number: Option<String>,
    #[serde(default)]
    pub serial_number: String,
    pub sold_to_party: Option<String>,
    pub shipped_to_customer_name: Option<String>,
    pub billing_date: Option<String>,
    pub billing_date_number: Option<String>,
    pub billing_type: Option<String>,
    pub net_quantity: Option<i32>,
    pub net_value_in_local_currency: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub net_tax: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub purchase_order_number: Option<String>,
    pub delivery_number: Option<String>,
    pub material_details: Option<String>,
}

pub async fn create_product(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateProductRequest>,
) -> Result<Json<MessageResponse>, WarrantyServiceError> {
    let usecase = CreateCatalogProductUseCase {
        repo: state.catalog_repo(),
    };
    usecase
        .execute(CreateCatalogProductInput {
            sales_order_number: body.sales_order_number,
            product_name: body.product_name,
            part_number: body.part_number,
            serial_number: body.serial_number,
            sold_to_party: body.sold_to_party,
            shipped_to_customer_name: body.shipped_to_customer_name,
            billing_date: body.billing_date,
            billing_date_number: body.billing_date_number,
            billing_type: body.billing_type,
            net_quantity: body.net_quantity,
            net_value_in_local_currency: body.net_value_in_local_currency,
            unit_price: body.unit_price,
            net_tax: body.net_tax,
            total_amount: body.total_amount,
            purchase_order_number: body.purchase_order_number,
            delivery_number: body.delivery_number,
            material_details: body.material_details,
        })
        .await?;
    Ok(Json(MessageResponse::new("Product inserted successfully.")))
}

// ── DELETE /products/{serial_number} ─────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteProductResponse {
    pub message: &'static str,
    pub deleted_product: CatalogProductResponse,
}

pub async fn delete_product(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> Result<Json<DeleteProductResponse>, WarrantyServiceError> {
    let usecase = DeleteCatalogProductUseCase {
        repo: state.catalog_repo(),
    };
    let deleted = usecase.execute(&serial_number).await?;
    Ok(Json(DeleteProductResponse {
        message: "Product deleted successfully",
        deleted_product: deleted.into(),
    }))
}
