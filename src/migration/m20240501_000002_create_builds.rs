//! Create builds table.

use sea_orm_migration::prelude::*;

use super::m20240501_000001_create_runs::Runs;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Builds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Builds::BuildId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Builds::RunId).integer().not_null())
                    .col(
                        ColumnDef::new(Builds::Status)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Builds::IsRelease)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Builds::Features)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Builds::Started).timestamp_with_time_zone())
                    .col(ColumnDef::new(Builds::Finished).timestamp_with_time_zone())
                    .col(ColumnDef::new(Builds::Stdout).blob())
                    .col(ColumnDef::new(Builds::Stderr).blob())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Builds::Table, Builds::RunId)
                            .to(Runs::Table, Runs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_builds_run_id")
                    .table(Builds::Table)
                    .col(Builds::RunId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Builds::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Builds {
    Table,
    BuildId,
    RunId,
    Status,
    IsRelease,
    Features,
    Started,
    Finished,
    Stdout,
    Stderr,
}
