use super::m20250301_000001_create_prompt_apps::PromptApps;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppExecutions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppExecutions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AppExecutions::AppId).string().not_null())
                    .col(
                        ColumnDef::new(AppExecutions::ExecutionResult)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppExecutions::ExecutionTime)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AppExecutions::Status).string().not_null())
                    .col(
                        ColumnDef::new(AppExecutions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_executions_app")
                            .from(AppExecutions::Table, AppExecutions::AppId)
                            .to(PromptApps::Table, PromptApps::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_app_executions_app_id")
                    .table(AppExecutions::Table)
                    .col(AppExecutions::AppId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppExecutions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AppExecutions {
    Table,
    Id,
    AppId,
    ExecutionResult,
    ExecutionTime,
    Status,
    CreatedAt,
}
