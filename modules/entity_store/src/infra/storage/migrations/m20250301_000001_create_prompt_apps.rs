use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PromptApps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PromptApps::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PromptApps::Name).string().not_null())
                    .col(ColumnDef::new(PromptApps::Description).text())
                    .col(ColumnDef::new(PromptApps::Prompt).text().not_null())
                    .col(ColumnDef::new(PromptApps::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(PromptApps::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PromptApps::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PromptApps::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PromptApps::Config).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_prompt_apps_created_by")
                    .table(PromptApps::Table)
                    .col(PromptApps::CreatedBy)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PromptApps::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum PromptApps {
    Table,
    Id,
    Name,
    Description,
    Prompt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    IsPublished,
    Config,
}
