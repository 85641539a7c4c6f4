use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Catalog of shipped products eligible for registration.
///
/// Referenced from registrations by `(product_name, serial_number)` match, not by key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
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
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub net_value_in_local_currency: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub unit_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub net_tax: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub total_amount: Option<Decimal>,
    pub purchase_order_number: Option<String>,
    pub delivery_number: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub material_details: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
