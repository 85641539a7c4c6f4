use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WarrantyClaims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WarrantyClaims::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WarrantyClaims::UserId).uuid().not_null())
                    // One claim per registration; concurrent filings lose on this constraint.
                    .col(
                        ColumnDef::new(WarrantyClaims::RegistrationId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(WarrantyClaims::CustomerRemarks)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(WarrantyClaims::ClaimStatus)
                            .string_len(16)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(WarrantyClaims::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(
                        Expr::col(WarrantyClaims::ClaimStatus)
                            .is_in(["Pending", "Approved", "Rejected"]),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(WarrantyClaims::Table, WarrantyClaims::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(WarrantyClaims::Table, WarrantyClaims::RegistrationId)
                            .to(ProductRegistrations::Table, ProductRegistrations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(WarrantyClaims::Table)
                    .col((WarrantyClaims::SubmittedAt, IndexOrder::Desc))
                    .name("idx_warranty_claims_submitted_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WarrantyClaims::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WarrantyClaims {
    Table,
    Id,
    UserId,
    RegistrationId,
    CustomerRemarks,
    ClaimStatus,
    SubmittedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum ProductRegistrations {
    Table,
    Id,
}
