use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductRegistrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductRegistrations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductRegistrations::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ProductRegistrations::ProductName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductRegistrations::SerialNumber)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ProductRegistrations::PartNumber)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProductRegistrations::InvoiceReceipt).text().null())
                    .col(
                        ColumnDef::new(ProductRegistrations::RegisteredForClaim)
                            .string_len(3)
                            .not_null()
                            .default("no"),
                    )
                    .col(
                        ColumnDef::new(ProductRegistrations::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(
                        Expr::col(ProductRegistrations::RegisteredForClaim).is_in(["yes", "no"]),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProductRegistrations::Table, ProductRegistrations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(ProductRegistrations::Table)
                    .col(ProductRegistrations::UserId)
                    .col((ProductRegistrations::RegisteredAt, IndexOrder::Desc))
                    .name("idx_product_registrations_user_id_registered_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductRegistrations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProductRegistrations {
    Table,
    Id,
    UserId,
    ProductName,
    SerialNumber,
    PartNumber,
    InvoiceReceipt,
    RegisteredForClaim,
    RegisteredAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
