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
                    .table(AppData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppData::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AppData::AppId).string().not_null())
                    .col(ColumnDef::new(AppData::DataType).string().not_null())
                    .col(ColumnDef::new(AppData::Content).text().not_null())
                    .col(
                        ColumnDef::new(AppData::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_data_app")
                            .from(AppData::Table, AppData::AppId)
                            .to(PromptApps::Table, PromptApps::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_app_data_app_id")
                    .table(AppData::Table)
                    .col(AppData::AppId)
                    .col(AppData::DataType)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppData::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AppData {
    Table,
    Id,
    AppId,
    DataType,
    Content,
    CreatedAt,
}
