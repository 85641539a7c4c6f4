use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::repository::CatalogRepository;
use crate::domain::types::CatalogProduct;
use crate::error::WarrantyServiceError;

// ── ListCatalog ──────────────────────────────────────────────────────────────

pub struct ListCatalogUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> ListCatalogUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<CatalogProduct>, WarrantyServiceError> {
        self.repo.list().await
    }
}

// ── ListShippedProducts ──────────────────────────────────────────────────────

pub struct ListShippedProductsUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> ListShippedProductsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<CatalogProduct>, WarrantyServiceError> {
        let products = self.repo.list().await?;
        if products.is_empty() {
            return Err(WarrantyServiceError::NotFound("no products available"));
        }
        Ok(products)
    }
}

// ── CreateCatalogProduct ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct CreateCatalogProductInput {
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
}

pub struct CreateCatalogProductUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> CreateCatalogProductUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateCatalogProductInput,
    ) -> Result<CatalogProduct, WarrantyServiceError> {
        let required = [
            ("sales_order_number", &input.sales_order_number),
            ("product_name", &input.product_name),
            ("serial_number", &input.serial_number),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(WarrantyServiceError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let product = CatalogProduct {
            id: Uuid::now_v7(),
            sales_order_number: input.sales_order_number,
            product_name: input.product_name,
            part_number: input.part_number,
            serial_number: input.serial_number,
            sold_to_party: input.sold_to_party,
            shipped_to_customer_name: input.shipped_to_customer_name,
            billing_date: input.billing_date,
            billing_date_number: input.billing_date_number,
            billing_type: input.billing_type,
            net_quantity: input.net_quantity,
            net_value_in_local_currency: input.net_value_in_local_currency,
            unit_price: input.unit_price,
            net_tax: input.net_tax,
            total_amount: input.total_amount,
            purchase_order_number: input.purchase_order_number,
            delivery_number: input.delivery_number,
            material_details: input.material_details,
            created_at: Utc::now(),
        };
        self.repo.create(&product).await?;
        info!(product_id = %product.id, serial_number = %product.serial_number, "catalog entry added");
        Ok(product)
    }
}

// ── DeleteCatalogProduct ─────────────────────────────────────────────────────

pub struct DeleteCatalogProductUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> DeleteCatalogProductUseCase<R> {
    pub async fn execute(&self, serial_number: &str) -> Result<CatalogProduct, WarrantyServiceError> {
        let deleted = self
            .repo
            .delete_by_serial(serial_number)
            .await?
            .ok_or(WarrantyServiceError::CatalogProductNotFound)?;
        info!(product_id = %deleted.id, serial_number, "catalog entry removed");
        Ok(deleted)
    }
}
