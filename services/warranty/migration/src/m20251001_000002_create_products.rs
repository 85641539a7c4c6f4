use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Products::SalesOrderNumber)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::ProductName).string_len(255).not_null())
                    .col(ColumnDef::new(Products::PartNumber).string_len(100).null())
                    .col(ColumnDef::new(Products::SerialNumber).string_len(100).not_null())
                    .col(ColumnDef::new(Products::SoldToParty).string_len(255).null())
                    .col(
                        ColumnDef::new(Products::ShippedToCustomerName)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Products::BillingDate).string_len(255).null())
                    .col(ColumnDef::new(Products::BillingDateNumber).string_len(50).null())
                    .col(ColumnDef::new(Products::BillingType).string_len(50).null())
                    .col(ColumnDef::new(Products::NetQuantity).integer().null())
                    .col(
                        ColumnDef::new(Products::NetValueInLocalCurrency)
                            .decimal_len(18, 2)
                            .null(),
                    )
                    .col(ColumnDef::new(Products::UnitPrice).decimal_len(18, 2).null())
                    .col(ColumnDef::new(Products::NetTax).decimal_len(18, 2).null())
                    .col(ColumnDef::new(Products::TotalAmount).decimal_len(18, 2).null())
                    .col(
                        ColumnDef::new(Products::PurchaseOrderNumber)
                            .string_len(100)
                            .null(),
                    )
                    .col(ColumnDef::new(Products::DeliveryNumber).string_len(100).null())
                    .col(ColumnDef::new(Products::MaterialDetails).text().null())
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Registration looks products up by (product_name, serial_number); delete by serial alone.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Products::Table)
                    .col(Products::SerialNumber)
                    .col(Products::ProductName)
                    .name("idx_products_serial_number_product_name")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    SalesOrderNumber,
    ProductName,
    PartNumber,
    SerialNumber,
    SoldToParty,
    ShippedToCustomerName,
    BillingDate,
    BillingDateNumber,
    BillingType,
    NetQuantity,
    NetValueInLocalCurrency,
    UnitPrice,
    NetTax,
    TotalAmount,
    PurchaseOrderNumber,
    DeliveryNumber,
    MaterialDetails,
    CreatedAt,
}
