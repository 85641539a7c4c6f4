use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SurveyResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SurveyResponses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SurveyResponses::CustomerName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(SurveyResponses::CustomerLocation)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SurveyResponses::Category).string_len(64).not_null())
                    .col(
                        ColumnDef::new(SurveyResponses::ParticipantName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SurveyResponses::ParticipantEmail)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SurveyResponses::BaseModelSize).string_len(8).not_null())
                    .col(ColumnDef::new(SurveyResponses::IsCustom).string_len(3).not_null())
                    .col(ColumnDef::new(SurveyResponses::OnHuggingFace).string_len(3).not_null())
                    .col(ColumnDef::new(SurveyResponses::HfLink).string_len(512).not_null())
                    .col(ColumnDef::new(SurveyResponses::Architecture).string_len(255).not_null())
                    .col(ColumnDef::new(SurveyResponses::Workloads).string_len(16).not_null())
                    .col(ColumnDef::new(SurveyResponses::InfraType).string_len(64).not_null())
                    .col(ColumnDef::new(SurveyResponses::Motherboard).string_len(255).null())
                    .col(ColumnDef::new(SurveyResponses::Processor).string_len(255).null())
                    .col(ColumnDef::new(SurveyResponses::Dram).string_len(255).null())
                    .col(ColumnDef::new(SurveyResponses::Gpus).string_len(255).null())
                    .col(ColumnDef::new(SurveyResponses::Os).string_len(255).null())
                    .col(
                        ColumnDef::new(SurveyResponses::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(
                        Expr::col(SurveyResponses::Category)
                            .is_in(["MSME/Educational_Institutions", "Datacentres"]),
                    )
                    .check(Expr::col(SurveyResponses::BaseModelSize).is_in([
                        ">=3B", "7B", "13B", "34B", "70B", "180B", "450B", "700B",
                    ]))
                    .check(Expr::col(SurveyResponses::IsCustom).is_in(["Yes", "No"]))
                    .check(Expr::col(SurveyResponses::OnHuggingFace).is_in(["Yes", "No"]))
                    .check(
                        Expr::col(SurveyResponses::Workloads)
                            .is_in(["Finetuning", "Inference", "Both"]),
                    )
                    .check(Expr::col(SurveyResponses::InfraType).is_in([
                        "On-premise",
                        "Private Cloud",
                        "No Existing AI Infrastructure",
                    ]))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SurveyResponses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SurveyResponses {
    Table,
    Id,
    CustomerName,
    CustomerLocation,
    Category,
    ParticipantName,
    ParticipantEmail,
    BaseModelSize,
    IsCustom,
    OnHuggingFace,
    HfLink,
    Architecture,
    Workloads,
    InfraType,
    Motherboard,
    Processor,
    Dram,
    Gpus,
    Os,
    SubmittedAt,
}
